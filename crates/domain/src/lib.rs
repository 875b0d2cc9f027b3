//! Domain-level building blocks shared by the bot binary and its adapters:
//! the environment contract the process boots from and the telemetry wiring
//! every binary installs.

pub mod config;
pub mod services;

pub use config::{BotConfig, ConfigError, DeliveryMode, UpdateDelivery};
