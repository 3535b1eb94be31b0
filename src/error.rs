// Error types for the mutual follows engine.
// Covers remote API failures, cache storage failures, and identity problems.

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MutualsError {
    #[error("Network error talking to the follows API: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Follows API unavailable: HTTP {status}")]
    RemoteUnavailable { status: u16 },

    #[error("Rate limit exceeded by the follows API")]
    RateLimited,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Malformed follows API response: {0}")]
    MalformedResponse(String),

    #[error("Self login is not set")]
    NoIdentity,

    #[error("Invalid login: {0:?}")]
    InvalidLogin(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MutualsError>;

impl MutualsError {
    /// Map a non-success HTTP status to the matching error.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            MutualsError::RateLimited
        } else {
            MutualsError::RemoteUnavailable {
                status: status.as_u16(),
            }
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            MutualsError::RemoteUnavailable { status } => Some(*status),
            MutualsError::RateLimited => Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
            MutualsError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(StatusCode::TOO_MANY_REQUESTS.as_u16())
    }

    /// Whether a failed fetch is worth another attempt.
    ///
    /// Unknown users, missing identity and local storage failures are final.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MutualsError::Network(_)
                | MutualsError::RemoteUnavailable { .. }
                | MutualsError::RateLimited
                | MutualsError::MalformedResponse(_)
        )
    }
}

/// Stable machine-readable failure code returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NoLogin,
    InvalidLogin,
    InvalidRequest,
    UserNotFound,
    RateLimit,
    SourceError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoLogin => "no_login",
            ErrorCode::InvalidLogin => "invalid_login",
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::UserNotFound => "user_not_found",
            ErrorCode::RateLimit => "rate_limit",
            ErrorCode::SourceError => "source_error",
        }
    }

    /// Human-readable message shown next to the code.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::NoLogin => "Your login is not set. Set it in the extension settings.",
            ErrorCode::InvalidLogin => {
                "A login may only contain letters, digits and underscores."
            }
            ErrorCode::InvalidRequest => "Unrecognized request",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::RateLimit => "Too many requests, try again later",
            ErrorCode::SourceError => "Failed to load follows",
        }
    }
}

impl From<&MutualsError> for ErrorCode {
    fn from(err: &MutualsError) -> Self {
        match err {
            MutualsError::NoIdentity => ErrorCode::NoLogin,
            MutualsError::InvalidLogin(_) => ErrorCode::InvalidLogin,
            MutualsError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            MutualsError::UserNotFound(_) => ErrorCode::UserNotFound,
            e if e.is_rate_limited() => ErrorCode::RateLimit,
            _ => ErrorCode::SourceError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            MutualsError::from_status(StatusCode::TOO_MANY_REQUESTS),
            MutualsError::RateLimited
        ));
        assert!(matches!(
            MutualsError::from_status(StatusCode::BAD_GATEWAY),
            MutualsError::RemoteUnavailable { status: 502 }
        ));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ErrorCode::from(&MutualsError::UserNotFound("ghost".into())),
            ErrorCode::UserNotFound
        );
        assert_eq!(ErrorCode::from(&MutualsError::RateLimited), ErrorCode::RateLimit);
        assert_eq!(
            ErrorCode::from(&MutualsError::RemoteUnavailable { status: 429 }),
            ErrorCode::RateLimit
        );
        assert_eq!(
            ErrorCode::from(&MutualsError::RemoteUnavailable { status: 500 }),
            ErrorCode::SourceError
        );
        assert_eq!(ErrorCode::from(&MutualsError::NoIdentity), ErrorCode::NoLogin);
        assert_eq!(
            ErrorCode::from(&MutualsError::MalformedResponse("x".into())),
            ErrorCode::SourceError
        );
        assert_eq!(
            ErrorCode::from(&MutualsError::Storage("disk full".into())),
            ErrorCode::SourceError
        );
        assert_eq!(
            ErrorCode::from(&MutualsError::InvalidRequest("eof".into())),
            ErrorCode::InvalidRequest
        );
    }

    #[test]
    fn test_retryable() {
        assert!(MutualsError::RateLimited.is_retryable());
        assert!(MutualsError::RemoteUnavailable { status: 503 }.is_retryable());
        assert!(!MutualsError::UserNotFound("ghost".into()).is_retryable());
        assert!(!MutualsError::Storage("disk full".into()).is_retryable());
        assert!(!MutualsError::NoIdentity.is_retryable());
    }

    #[test]
    fn test_code_strings() {
        assert_eq!(ErrorCode::UserNotFound.as_str(), "user_not_found");
        assert_eq!(ErrorCode::RateLimit.as_str(), "rate_limit");
        assert_eq!(
            serde_json::to_value(ErrorCode::SourceError).unwrap(),
            serde_json::json!("source_error")
        );
    }
}
