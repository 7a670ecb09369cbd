pub mod cli;
pub mod infer;
pub mod logging;
pub mod relay;

pub use infer::{ApiError, ChatCompletion, ChatRequest, ChatResponse, Client};
pub use relay::{RelayError, RelayRequest, relay};
