pub mod openai_client;
pub mod prompts;

use async_trait::async_trait;

use crate::error::Result;

pub use openai_client::OpenAIClient;

/// A hosted text-generation model that turns one prompt into one reply.
#[async_trait]
pub trait ChatModel: Send + Sync + std::fmt::Debug {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String>;
}
