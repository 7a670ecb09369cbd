use clap::Parser;

use crate::{
    infer::config::{DEFAULT_BASE_URL, DEFAULT_MODEL, InferConfig},
    relay::{RelayError, RelayRequest},
};

#[derive(Parser)]
#[command(
    name = "prompt-relay",
    version,
    about = "Send one prompt to a chat-completion API and print the reply"
)]
pub struct Cli {
    /// Prompt sent to the model as a single user message (required)
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// API key for the chat-completion service (required)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Model to ask
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Root URL of an OpenAI-compatible API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

impl Cli {
    pub fn into_relay_request(self) -> Result<(RelayRequest, InferConfig), RelayError> {
        let request = RelayRequest::new(self.prompt, self.key, Some(self.model))?;
        let config = InferConfig::new(request.key().clone()).with_base_url(self.base_url);
        Ok((request, config))
    }
}
