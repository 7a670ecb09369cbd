use reqwest::StatusCode;
use thiserror::Error;

use super::openai::OpenAIError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Response parsing failed: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("Error response from API ({status}): {message}")]
    ErrorResponse { status: StatusCode, message: Box<str> },

    #[error("API returned no completion choices")]
    NoChoices,

    #[error("First completion choice has no message content")]
    MissingContent,

    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidKey,
}

impl ApiError {
    pub(crate) fn from_error_body(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<OpenAIError>(body) {
            Ok(error) => error.into_message(),
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("empty response body")
                .into(),
            Err(_) => body.into(),
        };
        ApiError::ErrorResponse { status, message }
    }
}
