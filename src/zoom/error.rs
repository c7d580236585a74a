//! Errors returned by calls to the Zoom API.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZoomError {
    #[error("Zoom API returned {status}{}: {message}", .code.map(|c| format!(" (code {c})")).unwrap_or_default())]
    Api {
        status: StatusCode,
        code: Option<i64>,
        message: String,
    },
    #[error("invalid API base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("request to Zoom failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode Zoom response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ZoomError {
    /// Provider error code when the body carried one, otherwise the HTTP status.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Api { status, code, .. } => Some(code.unwrap_or(i64::from(status.as_u16()))),
            _ => None,
        }
    }

    /// Build an API error from a failed response body.
    ///
    /// Zoom error bodies look like `{"code": 3301, "message": "..."}`; the OAuth
    /// endpoint uses `{"reason": "...", "error": "..."}` instead. Anything that
    /// does not parse is kept verbatim as the message.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let code = parsed.as_ref().and_then(|b| b.code);
        let message = parsed
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("no response body")
                        .to_string()
                } else {
                    body.to_string()
                }
            });

        Self::Api {
            status,
            code,
            message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<i64>,
    message: Option<String>,
    error_description: Option<String>,
    reason: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.message)
            .or(self.reason)
            .or(self.error)
    }
}
