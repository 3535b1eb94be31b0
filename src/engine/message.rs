// Request/response messages exchanged with the host (content script, CLI).
// Requests are a closed set of operations; every response is either a success payload or a coded failure.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, MutualsError};
use crate::twitch::FollowItem;

/// Operation requested by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    /// Bounded, low-latency mutual follows preview.
    PreviewIntersection {
        target_login: String,
        #[serde(default)]
        force_refresh: bool,
    },
    /// Mutual follows over the larger page budget.
    FullIntersection {
        target_login: String,
        #[serde(default)]
        force_refresh: bool,
    },
    InvalidateOne {
        login: String,
    },
    InvalidateAll,
    GetSelfLogin,
    SetSelfLogin {
        login: String,
    },
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Request::PreviewIntersection { .. } => "preview-intersection",
            Request::FullIntersection { .. } => "full-intersection",
            Request::InvalidateOne { .. } => "invalidate-one",
            Request::InvalidateAll => "invalidate-all",
            Request::GetSelfLogin => "get-self-login",
            Request::SetSelfLogin { .. } => "set-self-login",
        }
    }
}

/// Preview of mutual follows. Always marked partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewIntersection {
    pub top: Vec<FollowItem>,
    pub total: usize,
    pub is_partial: bool,
    pub target_login: String,
}

/// Mutual follows with the complete intersected list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullIntersection {
    pub top: Vec<FollowItem>,
    pub total: usize,
    pub all_items: Vec<FollowItem>,
    pub is_partial: bool,
    pub target_login: String,
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Preview(PreviewIntersection),
    Full(FullIntersection),
    Cleared { count: usize },
    SelfLogin { login: Option<String> },
    Done {},
}

/// Failed response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&MutualsError> for Failure {
    fn from(err: &MutualsError) -> Self {
        let code = ErrorCode::from(err);
        Self {
            code,
            message: code.message().to_string(),
        }
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Success(Payload),
    Failure(Failure),
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Failure code, if this is a failure.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Response::Failure(failure) => Some(failure.code),
            Response::Success(_) => None,
        }
    }
}

impl From<crate::error::Result<Payload>> for Response {
    fn from(result: crate::error::Result<Payload>) -> Self {
        match result {
            Ok(payload) => Response::Success(payload),
            Err(e) => Response::Failure(Failure::from(&e)),
        }
    }
}
