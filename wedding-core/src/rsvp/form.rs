//! RSVP form controller.
//!
//! ```text
//! Editing --submit (valid)--> Submitting --sent--> Submitted
//!                                 |
//!                                 +--transport error--> Editing
//! ```
//!
//! `Submitted` is terminal. The phase doubles as the re-entry guard: a
//! `submit` that finds the form in `Submitting` or `Submitted` does nothing.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::celebration::Confetti;
use crate::page::FieldSet;

use super::endpoint::RsvpEndpoint;
use super::error::{FormError, SubmitError};
use super::payload::RsvpPayload;
use super::submission::{Attendance, Drink, FieldEdit, Submission, sanitize_phone};
use super::validate::validate;

const CONFETTI_PIECES: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Submitted,
}

/// What a successful submit hands back to the view
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub attending: bool,
    pub confetti: Confetti,
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Submitted(Confirmation),
    /// A previous submit is in flight or already done; nothing was sent
    Ignored(FormPhase),
}

struct FormState {
    submission: Submission,
    phase: FormPhase,
}

/// Controller for one page load's RSVP form
pub struct RsvpForm {
    fields: FieldSet,
    state: Mutex<FormState>,
}

impl RsvpForm {
    pub fn new(fields: FieldSet) -> Self {
        RsvpForm {
            fields,
            state: Mutex::new(FormState {
                submission: Submission::default(),
                phase: FormPhase::Editing,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.state().phase
    }

    /// Snapshot of the current answers
    pub fn submission(&self) -> Submission {
        self.state().submission.clone()
    }

    /// The "add to calendar" action is offered once an accepted RSVP is sent.
    pub fn calendar_available(&self) -> bool {
        let state = self.state();
        state.phase == FormPhase::Submitted && state.submission.is_attending()
    }

    /// Apply a single-field edit. All other fields are left as they were,
    /// except that declining clears guests, meal and drinks.
    pub fn edit(&self, edit: FieldEdit) -> Result<(), FormError> {
        let mut state = self.state();
        ensure_editable(state.phase)?;

        let field = edit.field();
        if !self.fields.shows(field) {
            return Err(FormError::FieldNotOnPage(field));
        }
        if field.depends_on_attendance() && state.submission.attendance == Some(Attendance::Decline)
        {
            return Err(FormError::FieldDisabled(field));
        }

        debug!(?field, "rsvp field edited");
        let submission = &mut state.submission;
        match edit {
            FieldEdit::Name(name) => submission.name = name,
            FieldEdit::Phone(phone) => submission.phone = sanitize_phone(&phone),
            FieldEdit::Attendance(attendance) => {
                submission.attendance = attendance;
                if attendance == Some(Attendance::Decline) {
                    submission.clear_attendance_dependent();
                }
            }
            FieldEdit::Guests(raw) => {
                submission.guests = parse_guests(&raw, self.fields.max_guests)?;
            }
            FieldEdit::Meal(meal) => submission.meal = meal,
            FieldEdit::Drinks(drinks) => submission.drinks = drinks,
            FieldEdit::Notes(notes) => submission.notes = notes,
        }

        Ok(())
    }

    /// Toggle one drink. See `DrinkSet::toggle` for the "No Drink" rules.
    pub fn toggle_drink(&self, drink: Drink) -> Result<(), FormError> {
        let mut drinks = self.state().submission.drinks.clone();
        drinks.toggle(drink);
        self.edit(FieldEdit::Drinks(drinks))
    }

    /// Validate and send the submission once.
    pub async fn submit(&self, endpoint: &dyn RsvpEndpoint) -> Result<SubmitOutcome, SubmitError> {
        let (payload, attending) = {
            let mut state = self.state();
            if state.phase != FormPhase::Editing {
                debug!(phase = ?state.phase, "ignoring repeated rsvp submit");
                return Ok(SubmitOutcome::Ignored(state.phase));
            }

            validate(&state.submission, &self.fields)?;

            state.phase = FormPhase::Submitting;
            (
                RsvpPayload::from(&state.submission),
                state.submission.is_attending(),
            )
        };

        match endpoint.send(&payload).await {
            Ok(()) => {
                self.state().phase = FormPhase::Submitted;
                info!(name = %payload.name, attendance = %payload.attendance, "rsvp sent");
                Ok(SubmitOutcome::Submitted(Confirmation {
                    attending,
                    confetti: Confetti::burst(CONFETTI_PIECES),
                }))
            }
            Err(e) => {
                self.state().phase = FormPhase::Editing;
                warn!(error = %e, "rsvp delivery failed");
                Err(SubmitError::Transport(e))
            }
        }
    }
}

fn ensure_editable(phase: FormPhase) -> Result<(), FormError> {
    match phase {
        FormPhase::Editing => Ok(()),
        FormPhase::Submitting => Err(FormError::Locked),
        FormPhase::Submitted => Err(FormError::Closed),
    }
}

fn parse_guests(raw: &str, max: u8) -> Result<Option<u8>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    match raw.parse::<u8>() {
        Ok(n) if (1..=max).contains(&n) => Ok(Some(n)),
        _ => Err(FormError::GuestCount { max }),
    }
}
