use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use teloxide::{
    error_handlers::LoggingErrorHandler, prelude::*, types::Update, update_listeners,
};
use tokio::sync::mpsc;
use tracing::info;
use url::Url;

use crate::{
    client::{BotClient, BotError},
    dispatch::{update_handler, UpdateSource},
    listener::{webhook_listener, InboundUpdates},
};

/// Updates accepted by the webhook route but not yet picked up by the
/// dispatcher.
const INBOUND_CAPACITY: usize = 256;

/// Teloxide-backed [`BotClient`]. One instance is shared by the webhook
/// route and whichever dispatcher runs.
pub struct TelegramClient {
    bot: Bot,
    inbound_tx: mpsc::Sender<Update>,
    inbound_rx: Mutex<Option<mpsc::Receiver<Update>>>,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::from_bot(Bot::new(token))
    }

    pub fn from_bot(bot: Bot) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_CAPACITY);
        Self {
            bot,
            inbound_tx,
            inbound_rx: Mutex::new(Some(inbound_rx)),
        }
    }

    /// The webhook queue has a single consumer.
    fn take_inbound(&self) -> Result<InboundUpdates, BotError> {
        self.inbound_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .map(InboundUpdates::new)
            .ok_or(BotError::AlreadyDispatching)
    }
}

#[async_trait]
impl BotClient for TelegramClient {
    async fn register_webhook(&self, endpoint: &Url) -> Result<(), BotError> {
        self.bot.set_webhook(endpoint.clone()).await?;
        Ok(())
    }

    async fn deliver_update(&self, payload: &[u8]) -> Result<(), BotError> {
        let update: Update = serde_json::from_slice(payload)?;
        self.inbound_tx
            .send(update)
            .await
            .map_err(|_| BotError::DispatcherClosed)
    }

    async fn dispatch_webhook_updates(&self) -> Result<(), BotError> {
        let listener = webhook_listener(self.take_inbound()?);
        // Fail here rather than inside the dispatcher, which panics when it
        // cannot fetch the bot identity.
        let me = self.bot.get_me().await?;
        info!(username = me.username(), "dispatching webhook updates");

        Dispatcher::builder(self.bot.clone(), update_handler(UpdateSource::Webhook))
            .error_handler(LoggingErrorHandler::with_custom_text(
                "an error has occurred in the update handler",
            ))
            .build()
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("an error from the webhook listener"),
            )
            .await;

        info!("webhook dispatcher stopped");
        Ok(())
    }

    async fn dispatch_long_polling(&self) -> Result<(), BotError> {
        let me = self.bot.get_me().await?;
        // Also drops any webhook left registered by a previous deployment.
        let listener = update_listeners::polling_default(self.bot.clone()).await;
        info!(username = me.username(), "bot started using long polling");

        Dispatcher::builder(self.bot.clone(), update_handler(UpdateSource::LongPolling))
            .error_handler(LoggingErrorHandler::with_custom_text(
                "an error has occurred in the update handler",
            ))
            .build()
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("an error from the long polling listener"),
            )
            .await;

        info!("long polling stopped");
        Ok(())
    }
}
