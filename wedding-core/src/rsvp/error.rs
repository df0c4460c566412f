//! Errors surfaced to the guest while filling in the RSVP form.
//!
//! The `Display` output of each variant is the notice shown to the guest.

use thiserror::Error;

use super::submission::Field;

/// First failing check of a submit attempt
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    MissingName,

    #[error("Please enter your phone number.")]
    MissingPhone,

    #[error("Please let us know whether you will attend.")]
    MissingAttendance,

    #[error("Please choose a meal preference.")]
    MissingMeal,

    #[error("Please select at least one drink, or \"No Drink\".")]
    MissingDrinks,
}

/// A rejected field edit. The submission is left unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Your RSVP has already been sent.")]
    Closed,

    #[error("Your RSVP is being sent, please wait.")]
    Locked,

    #[error("{0} is not needed when declining.")]
    FieldDisabled(Field),

    #[error("{0} is not part of this invitation.")]
    FieldNotOnPage(Field),

    #[error("Number of guests must be between 1 and {max}.")]
    GuestCount { max: u8 },
}

/// The outbound call failed before the request could be handed off.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not reach the RSVP service: {0}")]
pub struct TransportError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("There was an error submitting your RSVP. Please try again.")]
    Transport(#[source] TransportError),
}

/// A form value that does not name a known choice
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}
