//! Core types for wedding-site.
//!
//! This crate provides everything the server and the CLI share:
//! - `config` for the site description (couple, events, invitation pages)
//! - `rsvp` for the RSVP form controller and the outbound endpoint
//! - `calendar` for `.ics` generation and "add to calendar" links
//! - `celebration` for the confetti shown after a successful RSVP

pub mod calendar;
pub mod celebration;
pub mod config;
pub mod error;
pub mod event;
pub mod page;
pub mod rsvp;

pub use config::SiteConfig;
pub use error::{WeddingError, WeddingResult};
pub use event::WeddingEvent;
pub use page::{FieldSet, PageConfig};
