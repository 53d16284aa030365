use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::result::DatabaseErrorKind;
use serde::{Deserialize, Serialize};

use crate::types::ApiErrorResponse;

/// Application error codes following the pattern E{area}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/infrastructure errors
/// - E1xxx: Participant profile errors
/// - E2xxx: Interest signal errors
/// - E3xxx: Pairing errors
/// - E4xxx: Mediator errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    ValidationError,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    ServiceUnavailable,
    BadRequest,
    TokenExpired,
    TokenInvalid,

    // Participant (E1xxx)
    ParticipantNotFound,
    ParticipantAlreadyExists,
    SexNotRecorded,

    // Interest (E2xxx)
    InterestNotAllowed,
    CannotTargetSelf,

    // Pairing (E3xxx)
    PairingNotFound,
    AlreadyPaired,
    SameSexPairing,
    CandidateUnavailable,
    InvalidStatusTransition,

    // Mediator (E4xxx)
    MediatorNotFound,
    MediatorTierMismatch,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::ValidationError => "E0002",
            Self::NotFound => "E0003",
            Self::Unauthorized => "E0004",
            Self::Forbidden => "E0005",
            Self::Conflict => "E0006",
            Self::ServiceUnavailable => "E0007",
            Self::BadRequest => "E0008",
            Self::TokenExpired => "E0009",
            Self::TokenInvalid => "E0010",

            // Participant
            Self::ParticipantNotFound => "E1001",
            Self::ParticipantAlreadyExists => "E1002",
            Self::SexNotRecorded => "E1003",

            // Interest
            Self::InterestNotAllowed => "E2001",
            Self::CannotTargetSelf => "E2002",

            // Pairing
            Self::PairingNotFound => "E3001",
            Self::AlreadyPaired => "E3002",
            Self::SameSexPairing => "E3003",
            Self::CandidateUnavailable => "E3004",
            Self::InvalidStatusTransition => "E3005",

            // Mediator
            Self::MediatorNotFound => "E4001",
            Self::MediatorTierMismatch => "E4002",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InternalError | Self::ServiceUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationError | Self::BadRequest | Self::SameSexPairing
            | Self::MediatorTierMismatch | Self::SexNotRecorded => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::ParticipantNotFound | Self::PairingNotFound
            | Self::MediatorNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized | Self::TokenExpired | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::InterestNotAllowed | Self::CannotTargetSelf => StatusCode::FORBIDDEN,
            Self::Conflict | Self::ParticipantAlreadyExists | Self::AlreadyPaired
            | Self::CandidateUnavailable => StatusCode::CONFLICT,
            Self::InvalidStatusTransition => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known {
        code: ErrorCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The error code this error renders with.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Known { code, .. } => *code,
            AppError::Internal(_) => ErrorCode::InternalError,
            AppError::Database(diesel::result::Error::NotFound) => ErrorCode::NotFound,
            AppError::Database(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                ErrorCode::Conflict
            }
            AppError::Database(_) => ErrorCode::InternalError,
            AppError::Validation(_) => ErrorCode::ValidationError,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::Known { code, message, details } => {
                let status = code.status_code();
                let mut resp = ApiErrorResponse::new(code.code(), message);
                if let Some(d) = details {
                    resp = resp.with_details(d.clone());
                }
                (status, resp)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::new("E0001", "internal server error"),
                )
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                match err {
                    diesel::result::Error::NotFound => (
                        StatusCode::NOT_FOUND,
                        ApiErrorResponse::new("E0003", "resource not found"),
                    ),
                    diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => (
                        StatusCode::CONFLICT,
                        ApiErrorResponse::new("E0006", "resource already exists"),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiErrorResponse::new("E0001", "database error"),
                    ),
                }
            }
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse::new("E0002", msg),
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn codes_are_unique() {
        let all = [
            ErrorCode::InternalError,
            ErrorCode::ValidationError,
            ErrorCode::NotFound,
            ErrorCode::Unauthorized,
            ErrorCode::Forbidden,
            ErrorCode::Conflict,
            ErrorCode::ServiceUnavailable,
            ErrorCode::BadRequest,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::ParticipantNotFound,
            ErrorCode::ParticipantAlreadyExists,
            ErrorCode::SexNotRecorded,
            ErrorCode::InterestNotAllowed,
            ErrorCode::CannotTargetSelf,
            ErrorCode::PairingNotFound,
            ErrorCode::AlreadyPaired,
            ErrorCode::SameSexPairing,
            ErrorCode::CandidateUnavailable,
            ErrorCode::InvalidStatusTransition,
            ErrorCode::MediatorNotFound,
            ErrorCode::MediatorTierMismatch,
        ];
        let mut codes: Vec<&str> = all.iter().map(|c| c.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn pairing_errors_map_to_expected_statuses() {
        assert_eq!(ErrorCode::AlreadyPaired.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::PairingNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InvalidStatusTransition.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorCode::InterestNotAllowed.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn diesel_not_found_reports_not_found_code() {
        let err = AppError::from(diesel::result::Error::NotFound);
        assert_eq!(err.error_code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn known_error_renders_envelope() {
        let response = AppError::new(ErrorCode::ParticipantNotFound, "participant not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), 64 * 1024).await.expect("body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload["success"], false);
        assert_eq!(payload["error"]["code"], "E1001");
        assert_eq!(payload["error"]["message"], "participant not found");
    }
}
