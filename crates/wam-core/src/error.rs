//! Crate-level error types for the marketing console.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Alias for `Result<T, WamError>`.
pub type WamResult<T> = Result<T, WamError>;

/// Uniform error type used across the console crates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WamError {
    pub code: WamErrorCode,
    pub message: String,
    /// Optional sub-error detail from the backend API.
    pub details: Option<String>,
    /// HTTP status code if originated from an API call.
    pub http_status: Option<u16>,
}

impl fmt::Display for WamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref d) = self.details {
            write!(f, " ({})", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for WamError {}

/// Categorised error codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WamErrorCode {
    // ── Local validation ─────────────────────────────────
    Validation,
    SelectionLimit,
    ConfirmationRequired,
    NotConfigured,
    AlreadyRunning,
    // ── Backend API ──────────────────────────────────────
    AuthFailed,
    ResourceNotFound,
    RateLimited,
    BackendError,
    // ── Internal ─────────────────────────────────────────
    NetworkError,
    SerializationError,
    InternalError,
}

impl WamError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            code: WamErrorCode::Validation,
            message: msg.into(),
            details: None,
            http_status: None,
        }
    }

    pub fn selection_limit(max: usize) -> Self {
        Self {
            code: WamErrorCode::SelectionLimit,
            message: format!("Selection limit of {} contacts reached", max),
            details: None,
            http_status: None,
        }
    }

    pub fn confirmation_required(phrase: &str) -> Self {
        Self {
            code: WamErrorCode::ConfirmationRequired,
            message: format!("Type {} to confirm this action", phrase),
            details: None,
            http_status: None,
        }
    }

    pub fn not_configured(msg: impl Into<String>) -> Self {
        Self {
            code: WamErrorCode::NotConfigured,
            message: msg.into(),
            details: None,
            http_status: None,
        }
    }

    pub fn already_running(action: &str) -> Self {
        Self {
            code: WamErrorCode::AlreadyRunning,
            message: format!("{} is already running", action),
            details: None,
            http_status: None,
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self {
            code: WamErrorCode::NetworkError,
            message: msg.into(),
            details: None,
            http_status: None,
        }
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self {
            code: WamErrorCode::SerializationError,
            message: msg.into(),
            details: None,
            http_status: None,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            code: WamErrorCode::InternalError,
            message: msg.into(),
            details: None,
            http_status: None,
        }
    }

    /// Build from a backend API error response.
    ///
    /// The CRM backend answers failures with `{ "message": "...", "code": "..." }`
    /// (sometimes wrapped in `{ "error": ... }`). The extraction chain mirrors
    /// what the console surfaces to the user: body message, then raw body, then
    /// a generic status fallback.
    pub fn from_api_response(status: u16, body: &str) -> Self {
        let (msg, details) = Self::parse_backend_error(status, body);
        let code = Self::classify_status(status);
        Self {
            code,
            message: msg,
            details,
            http_status: Some(status),
        }
    }

    fn parse_backend_error(status: u16, body: &str) -> (String, Option<String>) {
        if let Ok(v) = serde_json::from_str::<serde_json::Value>(body) {
            let data = if v["error"].is_object() { &v["error"] } else { &v };
            if let Some(msg) = data["message"].as_str() {
                let detail = data["code"]
                    .as_str()
                    .map(|c| format!("code={}", c))
                    .or_else(|| data["code"].as_u64().map(|c| format!("code={}", c)));
                return (msg.to_string(), detail);
            }
        }
        let trimmed = body.trim();
        if trimmed.is_empty() {
            (
                format!("Request failed with status {}", status),
                None,
            )
        } else {
            (
                format!("Request failed with status {}", status),
                Some(trimmed.chars().take(500).collect()),
            )
        }
    }

    fn classify_status(status: u16) -> WamErrorCode {
        match status {
            400 => WamErrorCode::Validation,
            401 | 403 => WamErrorCode::AuthFailed,
            404 => WamErrorCode::ResourceNotFound,
            429 => WamErrorCode::RateLimited,
            _ => WamErrorCode::BackendError,
        }
    }
}
