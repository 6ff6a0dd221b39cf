use crate::models::ChatCompletionRequest;
use anyhow::Result;
use async_trait::async_trait;

/// A chat-completion backend.
///
/// The HTTP layer only needs "send these messages, give me the text back";
/// tests swap in a recording stub.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the text of the first choice.
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String>;
}
