pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::webhook_handler;

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use factbot_domain::config::{DeliveryMode, WEBHOOK_PATH};
use factbot_telegram::BotError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registers the health check, plus the webhook route when updates are
/// pushed to this process.
pub fn configure_routes(cfg: &mut web::ServiceConfig, mode: DeliveryMode) {
    cfg.route("/", web::get().to(health_handler));
    if mode == DeliveryMode::Webhook {
        cfg.route(WEBHOOK_PATH, web::post().to(webhook_handler));
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Bot(#[from] BotError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Bot(BotError::MalformedUpdate(_)) => StatusCode::BAD_REQUEST,
            ApiError::Bot(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
