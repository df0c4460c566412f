pub mod config;
pub mod events;
pub mod ics;
pub mod rsvp;
pub mod serve;
