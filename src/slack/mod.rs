pub mod client;

use async_trait::async_trait;

pub use client::SlackClient;

/// Provider-side delivery failures, classified at the wire so the dispatcher
/// can translate them without inspecting strings.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeliveryError {
    #[error("channel '{channel}' not found")]
    ChannelNotFound { channel: String },
    #[error("slack api error: {code}")]
    Api { code: String },
    #[error("slack transport error: {message}")]
    Transport { message: String },
    #[error("unexpected slack response: {message}")]
    Unexpected { message: String },
}

#[async_trait]
pub trait ChatDelivery: Send + Sync {
    /// Post `text` into `channel`, returning the provider's opaque message
    /// id on success.
    async fn post_message(&self, channel: &str, text: &str) -> Result<String, DeliveryError>;

    /// Connectivity probe for the health surface; never used by dispatch.
    async fn test_auth(&self) -> bool;
}
