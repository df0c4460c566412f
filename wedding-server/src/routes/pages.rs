//! Invitation pages

use axum::{
    Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use wedding_core::rsvp::Submission;

use crate::views::FormView;
use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{page}", get(invitation))
}

/// GET / - List pages, or go straight to the only one
async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let response = match state.site.pages.as_slice() {
        [only] => Redirect::to(&format!("/{}", only.slug)).into_response(),
        _ => Html(state.views.index_page(&state.site)?).into_response(),
    };
    Ok(response)
}

/// GET /:page - Invitation page with a fresh RSVP form
async fn invitation(
    State(state): State<AppState>,
    Path(page_slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let site = &state.site;
    let page = site.page(&page_slug)?;
    let events = site.page_events(page)?;

    let (session, _form) = state.sessions.create(page);
    let submission = Submission::default();

    Ok(Html(state.views.invitation_page(
        site,
        page,
        &events,
        &FormView {
            session,
            submission: &submission,
            notice: None,
        },
    )?))
}
