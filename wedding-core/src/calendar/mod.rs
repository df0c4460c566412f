//! "Add to calendar" support.
//!
//! `.ics` files for download and template links for hosted calendars.

mod ics;
mod links;

pub use ics::generate_ics;
pub use links::{google_calendar_url, outlook_calendar_url};
