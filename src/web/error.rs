use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::content::SummaryError;
use crate::storage::StoreError;
use crate::web::render;

/// Errors a handler can return; each one renders as an HTML error page.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request parameter
    #[error("{0}")]
    BadRequest(String),

    /// Article summarization failed
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// Reading or writing the sources file failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Summary(SummaryError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
            AppError::Summary(SummaryError::ExtractionFailed) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Summary(e) if e.is_fetch_failure() => StatusCode::BAD_GATEWAY,
            AppError::Summary(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match &self {
            AppError::BadRequest(msg) => tracing::debug!(error = %msg, "Rejected request"),
            AppError::Summary(e) => tracing::warn!(status = status.as_u16(), error = %e, "Summarization failed"),
            AppError::Store(e) => tracing::error!(error = %e, "Source store error"),
        }
        (status, Html(render::error_page(status, &message))).into_response()
    }
}
