pub mod config;
mod error;
pub use error::ApiError;
mod openai;
use openai::{OpenAIMessage, OpenAIRequest};

use config::InferConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn into_role_str(self) -> &'static str {
        match self {
            Self::System => openai::ROLE_SYSTEM,
            Self::User => openai::ROLE_USER,
            Self::Assistant => openai::ROLE_ASSISTANT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: Box<str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: Box<str>,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    pub fn new(model: impl Into<Box<str>>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub(crate) fn as_openai_messages(&self) -> Vec<OpenAIMessage<'_>> {
        self.messages
            .iter()
            .map(|message| OpenAIMessage {
                role: message.role.into_role_str(),
                content: &message.content,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub content: Box<str>,
}

/// One chat-completion round trip. `Client` talks to the network; tests plug
/// in their own implementations.
#[allow(async_fn_in_trait)]
pub trait ChatCompletion {
    async fn submit(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;
}

pub struct Client {
    http: reqwest::Client,
    base_url: Box<str>,
}

impl Client {
    pub fn new(config: InferConfig) -> Result<Self, ApiError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.key.expose()))
            .map_err(|_| ApiError::InvalidKey)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

impl ChatCompletion for Client {
    async fn submit(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let messages = request.as_openai_messages();
        let content = openai::openai_request(
            &self.http,
            &self.base_url,
            &OpenAIRequest {
                model: &request.model,
                messages: &messages,
            },
        )
        .await?;
        Ok(ChatResponse { content })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, extract::State, http::HeaderMap, routing::post};

    use super::config::ApiKey;
    use super::*;

    const HI_THERE: &str = r#"{"choices":[{"message":{"content":"Hi there"}}]}"#;

    async fn spawn_header_stub() -> (String, Arc<Mutex<Vec<HeaderMap>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                openai::COMPLETIONS_PATH,
                post(|State(seen): State<Arc<Mutex<Vec<HeaderMap>>>>, headers: HeaderMap| async move {
                    seen.lock().unwrap().push(headers);
                    HI_THERE
                }),
            )
            .with_state(seen.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (format!("http://{addr}"), seen)
    }

    #[test]
    fn roles_map_to_wire_strings() {
        assert_eq!(MessageRole::System.into_role_str(), "system");
        assert_eq!(MessageRole::User.into_role_str(), "user");
        assert_eq!(MessageRole::Assistant.into_role_str(), "assistant");
    }

    #[test]
    fn openai_messages_keep_order_and_content() {
        let request = ChatRequest::new("gpt-3.5-turbo")
            .with_message(Message {
                role: MessageRole::System,
                content: "Be brief.".into(),
            })
            .with_message(Message {
                role: MessageRole::User,
                content: "Hello".into(),
            });

        let messages = request.as_openai_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!((messages[0].role, messages[0].content), ("system", "Be brief."));
        assert_eq!((messages[1].role, messages[1].content), ("user", "Hello"));
    }

    #[test]
    fn key_with_newline_is_rejected_before_any_request() {
        let config = InferConfig::new(ApiKey::new("sk-test\n"));
        assert!(matches!(Client::new(config), Err(ApiError::InvalidKey)));
    }

    #[tokio::test]
    async fn client_sends_bearer_key() {
        let (base_url, seen) = spawn_header_stub().await;
        let client = Client::new(InferConfig::new(ApiKey::new("sk-test")).with_base_url(base_url)).unwrap();

        let response = client
            .submit(&ChatRequest::new("gpt-3.5-turbo").with_message(Message {
                role: MessageRole::User,
                content: "Hello".into(),
            }))
            .await
            .unwrap();
        assert_eq!(response.content.as_ref(), "Hi there");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].get("authorization").unwrap(), "Bearer sk-test");
    }
}
