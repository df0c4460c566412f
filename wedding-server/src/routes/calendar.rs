//! Calendar downloads

use axum::{
    Router,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use wedding_core::WeddingError;
use wedding_core::calendar::generate_ics;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{page}/calendar.ics", get(page_calendar))
        .route("/events/{file}", get(event_calendar))
}

fn ics_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.ics\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// GET /:page/calendar.ics - Every event of a page
async fn page_calendar(
    State(state): State<AppState>,
    Path(page_slug): Path<String>,
) -> Result<Response, AppError> {
    let site = &state.site;
    let page = site.page(&page_slug)?;
    let events = site.page_events(page)?;

    let ics = generate_ics(&events, site.timezone, &site.title)?;
    Ok(ics_response(&page.slug, ics))
}

/// GET /events/:event.ics - A single event
async fn event_calendar(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    let slug = file
        .strip_suffix(".ics")
        .ok_or_else(|| WeddingError::EventNotFound(file.clone()))?;

    let site = &state.site;
    let event = site.event(slug)?;

    let ics = generate_ics(&[event], site.timezone, &site.title)?;
    Ok(ics_response(&event.slug, ics))
}
