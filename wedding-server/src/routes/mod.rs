pub mod calendar;
pub mod pages;
pub mod rsvp;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use wedding_core::WeddingError;

use crate::views;

/// Convert anyhow errors to HTTP responses
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<WeddingError>() {
            Some(WeddingError::PageNotFound(_) | WeddingError::EventNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            _ => {
                tracing::error!(error = %self.0, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Html(views::error_page(&self.0.to_string()))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
