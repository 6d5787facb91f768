//! Upstream AI provider integrations.

mod openai;
mod retry;

pub use openai::{OpenAiProvider, OpenAiProviderConfig};
pub use retry::call_with_retry;
