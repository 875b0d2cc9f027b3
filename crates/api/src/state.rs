use std::sync::Arc;

use factbot_telegram::BotClient;

#[derive(Clone)]
pub struct AppState {
    bot: Arc<dyn BotClient>,
}

impl AppState {
    pub fn new(bot: Arc<dyn BotClient>) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> &dyn BotClient {
        self.bot.as_ref()
    }
}
