use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// A single inline validation failure, keyed by a dotted field path
/// such as `clientName` or `items[2].particular`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Business rule violations
    #[error("Validation error: {0}")]
    Validation(String),

    /// Per-field input validation errors, reported inline by the editor
    #[error("Invalid fields: {}", join_fields(.0))]
    InvalidFields(Vec<FieldError>),

    /// A submission of the same draft is already in flight
    #[error("Submission already in progress")]
    SubmissionInProgress,

    /// Billing backend rejected or could not store the bill
    #[error("Failed to save bill: {0}")]
    Persistence(String),

    /// Bill was stored but the document service failed
    #[error("Bill {bill_id} saved, but document generation failed: {message}")]
    DocumentGeneration { bill_id: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let mut body = serde_json::json!({
            "message": self.to_string(),
            "code": status_code.as_u16(),
        });

        match self {
            AppError::InvalidFields(fields) => {
                body["fields"] = serde_json::json!(fields);
            }
            AppError::DocumentGeneration { bill_id, .. } => {
                body["bill_id"] = serde_json::json!(bill_id);
            }
            _ => {}
        }

        HttpResponse::build(status_code).json(serde_json::json!({ "error": body }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::SubmissionInProgress => StatusCode::CONFLICT,
            AppError::Persistence(_) => StatusCode::BAD_GATEWAY,
            AppError::DocumentGeneration { .. } => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        AppError::Persistence(msg.into())
    }

    pub fn document(bill_id: impl Into<String>, msg: impl Into<String>) -> Self {
        AppError::DocumentGeneration {
            bill_id: bill_id.into(),
            message: msg.into(),
        }
    }

    /// Message shown to the user in the editor's error banner
    pub fn user_message(&self) -> String {
        match self {
            AppError::Persistence(msg) => format!("Could not save the bill: {}", msg),
            AppError::DocumentGeneration { message, .. } => {
                format!("Bill saved, but document generation failed: {}", message)
            }
            other => other.to_string(),
        }
    }
}
