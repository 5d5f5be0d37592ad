use crate::db::errors::DbError;
use crate::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// User-correctable input rejection from the validation unit
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Capacity conflict: the target slot is full and the registrant is new
    #[error("This time slot is already full. Please choose another.")]
    SlotFull,

    /// Unparseable multipart form body
    #[error("Form parsing error: {detail}")]
    FormParsing { detail: String },

    /// Database operation error, reported to the client as the generic
    /// per-endpoint message in `context`
    #[error("{context}")]
    Database {
        context: &'static str,
        source: DbError,
    },
}

impl Error {
    /// Attach a client-facing context message to a database error. The
    /// underlying detail stays server-side.
    pub fn db(context: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| Self::Database { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::SlotFull | Error::FormParsing { .. } => StatusCode::BAD_REQUEST,
            Error::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(e) => e.to_string(),
            Error::SlotFull => "This time slot is already full. Please choose another.".to_string(),
            Error::FormParsing { .. } => "Form parsing error".to_string(),
            Error::Database { context, .. } => (*context).to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database { context, source } => {
                tracing::error!(context = %context, "Database error: {:#?}", source);
            }
            Error::SlotFull => {
                tracing::info!("Capacity conflict: {}", self);
            }
            Error::Validation(_) | Error::FormParsing { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = json!({ "error": self.user_message() });
        (status, axum::response::Json(body)).into_response()
    }
}

/// Type alias for API handler results
pub type Result<T> = std::result::Result<T, Error>;
