use actix_web::{web, HttpResponse};
use factbot_telegram::BotError;
use metrics::counter;
use strum_macros::AsRefStr;
use tracing::warn;

use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
enum WebhookOutcome {
    Accepted,
    Malformed,
    Unavailable,
}

/// Hands the raw request body to the bot client untouched.
pub async fn webhook_handler(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    match state.bot().deliver_update(&body).await {
        Ok(()) => {
            record(WebhookOutcome::Accepted);
            Ok(HttpResponse::Ok().finish())
        }
        Err(err) => {
            let outcome = match err {
                BotError::MalformedUpdate(_) => WebhookOutcome::Malformed,
                _ => WebhookOutcome::Unavailable,
            };
            record(outcome);
            warn!(%err, outcome = outcome.as_ref(), "webhook update rejected");
            Err(err.into())
        }
    }
}

fn record(outcome: WebhookOutcome) {
    counter!("factbot_webhook_updates_total", "status" => outcome.as_ref().to_owned()).increment(1);
}
