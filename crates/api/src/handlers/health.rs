use actix_web::HttpResponse;
use chrono::{SecondsFormat, Utc};
use metrics::counter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// RFC 3339 / ISO-8601 in UTC with millisecond precision.
    pub timestamp: String,
}

pub async fn health_handler() -> HttpResponse {
    counter!("factbot_health_checks_total").increment(1);
    HttpResponse::Ok().json(HealthResponse {
        status: HealthStatus::Ok,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
