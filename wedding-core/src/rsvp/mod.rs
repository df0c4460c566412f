//! RSVP form handling.
//!
//! `RsvpForm` is the controller for one page load: it owns the in-memory
//! `Submission`, applies field edits, validates, and sends the payload to the
//! page's `RsvpEndpoint` exactly once.

mod endpoint;
mod error;
mod form;
mod payload;
mod submission;
mod validate;

pub use endpoint::{RsvpEndpoint, ScriptEndpoint};
pub use error::{FormError, SubmitError, TransportError, UnknownChoice, ValidationError};
pub use form::{Confirmation, FormPhase, RsvpForm, SubmitOutcome};
pub use payload::RsvpPayload;
pub use submission::{
    Attendance, Drink, DrinkSet, Field, FieldEdit, Meal, Submission, sanitize_phone,
};
pub use validate::validate;
