//! RSVP form posts

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::post,
};
use uuid::Uuid;
use wedding_core::celebration::Confetti;
use wedding_core::rsvp::{
    Attendance, Drink, DrinkSet, FieldEdit, FormError, FormPhase, Meal, RsvpForm, SubmitError,
    SubmitOutcome,
};
use wedding_core::{PageConfig, WeddingEvent};

use crate::views::FormView;
use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/{page}/rsvp", post(submit))
}

/// Urlencoded form body. `drinks` repeats once per checked box.
#[derive(Debug, Default)]
struct PostedRsvp {
    session: Option<Uuid>,
    name: String,
    phone: Option<String>,
    attendance: Option<String>,
    guests: Option<String>,
    meal: Option<String>,
    drinks: Vec<String>,
    notes: Option<String>,
}

impl PostedRsvp {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut posted = PostedRsvp::default();
        for (key, value) in pairs {
            match key.as_str() {
                "session" => posted.session = value.parse().ok(),
                "name" => posted.name = value,
                "phone" => posted.phone = Some(value),
                "attendance" => posted.attendance = Some(value),
                "guests" => posted.guests = Some(value),
                "meal" => posted.meal = Some(value),
                "drinks" => posted.drinks.push(value),
                "notes" => posted.notes = Some(value),
                _ => {}
            }
        }
        posted
    }

    /// Copy the posted values into the form, one edit per field.
    ///
    /// Every field is applied even when an earlier one is rejected, so the
    /// re-rendered form keeps all of the guest's answers; the first rejection
    /// is returned. Attendance goes first so that a decline skips the fields
    /// it disables. A blank attendance clears the previous answer.
    fn apply(self, form: &RsvpForm) -> anyhow::Result<()> {
        let fields = *form.fields();
        let mut results: Vec<anyhow::Result<()>> = Vec::new();

        results.push(form.edit(FieldEdit::Name(self.name)).map_err(Into::into));

        if fields.phone {
            let phone = self.phone.unwrap_or_default();
            results.push(form.edit(FieldEdit::Phone(phone)).map_err(Into::into));
        }

        match parse_choice::<Attendance>(self.attendance) {
            Ok(attendance) => {
                results.push(form.edit(FieldEdit::Attendance(attendance)).map_err(Into::into))
            }
            Err(e) => results.push(Err(e)),
        }

        if form.submission().attendance != Some(Attendance::Decline) {
            if fields.guests {
                let guests = self.guests.unwrap_or_default();
                results.push(form.edit(FieldEdit::Guests(guests)).map_err(Into::into));
            }
            if fields.meal {
                match parse_choice::<Meal>(self.meal) {
                    Ok(meal) => results.push(form.edit(FieldEdit::Meal(meal)).map_err(Into::into)),
                    Err(e) => results.push(Err(e)),
                }
            }
            if fields.drinks {
                let mut drinks = Vec::new();
                for value in &self.drinks {
                    match value.parse::<Drink>() {
                        Ok(drink) => drinks.push(drink),
                        Err(e) => results.push(Err(e.into())),
                    }
                }
                let drinks = DrinkSet::from_selection(drinks);
                results.push(form.edit(FieldEdit::Drinks(drinks)).map_err(Into::into));
            }
        }

        if fields.notes {
            let notes = self.notes.unwrap_or_default();
            results.push(form.edit(FieldEdit::Notes(notes)).map_err(Into::into));
        }

        results.into_iter().collect()
    }
}

/// Missing and blank values both mean "no choice".
fn parse_choice<T>(value: Option<String>) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value.filter(|v| !v.is_empty()) {
        Some(v) => Ok(Some(v.parse::<T>()?)),
        None => Ok(None),
    }
}

struct PageContext<'a> {
    state: &'a AppState,
    page: &'a PageConfig,
    events: Vec<&'a WeddingEvent>,
}

impl PageContext<'_> {
    fn form_with_notice(
        &self,
        status: StatusCode,
        session: Uuid,
        form: &RsvpForm,
        notice: &str,
    ) -> anyhow::Result<Response> {
        let submission = form.submission();
        let body = self.state.views.invitation_page(
            &self.state.site,
            self.page,
            &self.events,
            &FormView {
                session,
                submission: &submission,
                notice: Some(notice),
            },
        )?;
        Ok((status, Html(body)).into_response())
    }

    fn thank_you(&self, form: &RsvpForm, confetti: Option<&Confetti>) -> anyhow::Result<Response> {
        let attending = form.calendar_available();
        let body = self.state.views.thank_you_page(
            &self.state.site,
            self.page,
            &self.events,
            attending,
            confetti,
        )?;
        Ok(Html(body).into_response())
    }
}

/// POST /:page/rsvp - Apply the posted answers to the session's form and submit
async fn submit(
    State(state): State<AppState>,
    Path(page_slug): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let page = state.site.page(&page_slug)?;
    let ctx = PageContext {
        state: &state,
        page,
        events: state.site.page_events(page)?,
    };
    let endpoint = state
        .endpoint(&page.slug)
        .ok_or_else(|| anyhow!("No RSVP endpoint for page {}", page.slug))?;

    let posted = PostedRsvp::from_pairs(pairs);

    // Unknown or expired sessions get a fresh form
    let (session, form): (Uuid, Arc<RsvpForm>) =
        match posted.session.and_then(|id| state.sessions.get(id, &page.slug).map(|f| (id, f))) {
            Some(found) => found,
            None => state.sessions.create(page),
        };

    match form.phase() {
        FormPhase::Submitted => return Ok(ctx.thank_you(&form, None)?),
        FormPhase::Submitting => {
            return Ok(ctx.form_with_notice(
                StatusCode::CONFLICT,
                session,
                &form,
                &FormError::Locked.to_string(),
            )?);
        }
        FormPhase::Editing => {}
    }

    if let Err(e) = posted.apply(&form) {
        return Ok(ctx.form_with_notice(
            StatusCode::UNPROCESSABLE_ENTITY,
            session,
            &form,
            &e.to_string(),
        )?);
    }

    let response = match form.submit(endpoint.as_ref()).await {
        Ok(SubmitOutcome::Submitted(confirmation)) => {
            tracing::info!(page = %page.slug, %session, "rsvp accepted by endpoint");
            ctx.thank_you(&form, Some(&confirmation.confetti))
        }
        Ok(SubmitOutcome::Ignored(FormPhase::Submitted)) => ctx.thank_you(&form, None),
        Ok(SubmitOutcome::Ignored(_)) => ctx.form_with_notice(
            StatusCode::CONFLICT,
            session,
            &form,
            &FormError::Locked.to_string(),
        ),
        Err(e @ SubmitError::Invalid(_)) => ctx.form_with_notice(
            StatusCode::UNPROCESSABLE_ENTITY,
            session,
            &form,
            &e.to_string(),
        ),
        Err(e @ SubmitError::Transport(_)) => {
            ctx.form_with_notice(StatusCode::BAD_GATEWAY, session, &form, &e.to_string())
        }
    }?;

    Ok(response)
}
