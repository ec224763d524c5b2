//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Salesforce username or password is missing")]
    MissingCredentials,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Login(String),
    #[error("Salesforce request failed with status {status}: {body}")]
    Remote { status: u16, body: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("serialization: {0}")]
    Json(#[from] serde_json::Error),
    /// PATCH has its own failure layer: per-record failures and update
    /// transport errors respond with a different message than the rest.
    #[error("Account update failed")]
    UpdateFailed { error: String },
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: &'static str,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (message, error) = match self {
            AppError::UpdateFailed { error } => ("Account update failed", error),
            other => ("Salesforce integration failed", other.to_string()),
        };
        tracing::error!(%error, "{}", message);
        let body = ErrorBody { message, error };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
