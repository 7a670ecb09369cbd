use thiserror::Error;

use crate::infer::{
    ApiError, ChatCompletion, ChatRequest, Message, MessageRole, config::ApiKey,
    config::DEFAULT_MODEL,
};

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Please provide {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    RemoteCallFailure(#[from] ApiError),
}

/// A prompt that passed validation: both the prompt and the key are non-empty.
#[derive(Debug, Clone)]
pub struct RelayRequest {
    prompt: Box<str>,
    key: ApiKey,
    model: Box<str>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl RelayRequest {
    pub fn new(
        prompt: Option<String>,
        key: Option<String>,
        model: Option<String>,
    ) -> Result<Self, RelayError> {
        let prompt = non_empty(prompt).ok_or(RelayError::MissingArgument("a prompt"))?;
        let key = non_empty(key).ok_or(RelayError::MissingArgument("an API key"))?;
        let model: Box<str> = non_empty(model).map_or_else(|| DEFAULT_MODEL.into(), Into::into);

        Ok(Self {
            prompt: prompt.into(),
            key: ApiKey::new(key),
            model,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn key(&self) -> &ApiKey {
        &self.key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn to_chat_request(&self) -> ChatRequest {
        ChatRequest::new(self.model.clone()).with_message(Message {
            role: MessageRole::User,
            content: self.prompt.clone(),
        })
    }
}

/// Sends the prompt as a single user message and returns the first choice's
/// text as-is. Errors from the client are passed through untouched.
pub async fn relay<C: ChatCompletion>(client: &C, request: &RelayRequest) -> Result<Box<str>, RelayError> {
    tracing::info!(
        model = request.model(),
        prompt_chars = request.prompt().chars().count(),
        "relaying prompt"
    );

    let response = client.submit(&request.to_chat_request()).await?;

    tracing::info!(reply_chars = response.content.chars().count(), "received reply");
    Ok(response.content)
}
