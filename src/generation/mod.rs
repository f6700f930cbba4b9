pub mod openai;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    RequestFailed(String),
    #[error("generation response invalid: {0}")]
    InvalidResponse(String),
}

/// Narrow seam over the text-generation provider. The renderer treats every
/// failure identically, so the error carries detail for logging only.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
