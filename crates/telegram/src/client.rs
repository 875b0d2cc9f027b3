use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Everything the bootstrap needs from the messaging platform.
#[async_trait]
pub trait BotClient: Send + Sync {
    /// Tells the platform where to push updates.
    async fn register_webhook(&self, endpoint: &Url) -> Result<(), BotError>;

    /// Hands one raw webhook request body to the bot's update handler.
    async fn deliver_update(&self, payload: &[u8]) -> Result<(), BotError>;

    /// Runs the dispatcher over updates handed in through
    /// [`BotClient::deliver_update`]. Returns once the dispatcher stops.
    async fn dispatch_webhook_updates(&self) -> Result<(), BotError>;

    /// Pulls updates from the platform and dispatches them. Returns once
    /// the dispatcher stops.
    async fn dispatch_long_polling(&self) -> Result<(), BotError>;
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),
    #[error("malformed update payload: {0}")]
    MalformedUpdate(#[from] serde_json::Error),
    #[error("no dispatcher is consuming webhook updates")]
    DispatcherClosed,
    #[error("webhook updates are already being dispatched")]
    AlreadyDispatching,
}
