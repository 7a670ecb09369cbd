use serde::{Deserialize, Serialize};

use super::error::ApiError;

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Serialize)]
pub struct OpenAIRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [OpenAIMessage<'a>],
}

#[derive(Debug, Serialize)]
pub struct OpenAIMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    // null when the model answers with tool calls only
    content: Option<Box<str>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

/// Error envelope. OpenAI sends `{"error": {"message": ..}}`, some compatible
/// servers send `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub struct OpenAIError {
    pub error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OpenAIErrorDetail {
    Object { message: String },
    Text(String),
}

impl OpenAIError {
    pub fn into_message(self) -> Box<str> {
        match self.error {
            OpenAIErrorDetail::Object { message } => message.into(),
            OpenAIErrorDetail::Text(message) => message.into(),
        }
    }
}

pub fn completions_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH)
}

pub async fn openai_request(
    client: &reqwest::Client,
    base_url: &str,
    request: &OpenAIRequest<'_>,
) -> Result<Box<str>, ApiError> {
    let url = completions_url(base_url);
    tracing::debug!(%url, model = request.model, "sending chat completion request");

    let response = client.post(&url).json(request).send().await?;
    let status = response.status();
    let response_text = response.text().await?;
    tracing::debug!(%status, bytes = response_text.len(), "received chat completion response");

    if !status.is_success() {
        return Err(ApiError::from_error_body(status, &response_text));
    }

    // A 2xx carrying an error envelope is still an error
    if serde_json::from_str::<OpenAIError>(&response_text).is_ok() {
        return Err(ApiError::from_error_body(status, &response_text));
    }

    let response: OpenAIResponse = serde_json::from_str(&response_text)?;
    response
        .choices
        .into_iter()
        .next()
        .ok_or(ApiError::NoChoices)?
        .message
        .content
        .ok_or(ApiError::MissingContent)
}
