use metrics::counter;
use strum_macros::AsRefStr;
use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    RequestError,
};
use tracing::debug;

/// Where an update entered the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum UpdateSource {
    Webhook,
    LongPolling,
}

/// The single dispatcher endpoint. Updates are recorded and otherwise left
/// alone; there is no conversation logic behind it.
pub fn update_handler(source: UpdateSource) -> UpdateHandler<RequestError> {
    dptree::entry().endpoint(move |update: Update| async move {
        debug!(update_id = ?update.id, source = source.as_ref(), "update received");
        counter!("factbot_updates_total", "source" => source.as_ref().to_owned()).increment(1);
        respond(())
    })
}
