//! Errors raised while talking to the model endpoint

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LLMError>;

#[derive(Error, Debug)]
pub enum LLMError {
    /// 401 or 403: the API key was refused
    #[error("API key rejected ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// 429: quota or rate limit exhausted
    #[error("Rate limited by the model endpoint: {0}")]
    RateLimited(String),

    /// 400: the endpoint refused the request body
    #[error("Request rejected by the model endpoint: {0}")]
    BadRequest(String),

    /// 404: the configured model does not exist
    #[error("Model '{0}' is not available")]
    UnknownModel(String),

    /// Any other non-success status
    #[error("Model endpoint returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Transport failure or timeout
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A success response we could not read
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Failure reported by a provider implementation
    #[error("Provider error: {0}")]
    Provider(String),
}

impl LLMError {
    /// Map a non-success status and its body to an error
    ///
    /// Gemini wraps the message as `{"error": {"message": ..}}`, sometimes
    /// inside a one-element array.
    pub fn from_status(status: StatusCode, model: &str, body: &str) -> Self {
        let message = error_message(body);
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 | 403 => Self::Unauthorized {
                status: status.as_u16(),
                message,
            },
            404 => Self::UnknownModel(model.to_string()),
            429 => Self::RateLimited(message),
            code => Self::Upstream {
                status: code,
                message,
            },
        }
    }
}

fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let envelope = match &parsed {
        Some(Value::Array(items)) => items.first(),
        other => other.as_ref(),
    };

    envelope
        .and_then(|v| v.pointer("/error/message"))
        .and_then(Value::as_str)
        .map_or_else(|| body.trim().to_string(), str::to_string)
}
