mod alerts;
mod config;
mod error;
mod logging;
mod scheduler;
mod services;
mod sighting;

use std::sync::Arc;

use dotenvy::dotenv;

use crate::alerts::email::{EmailNotifier, SmtpMailTransport};
use crate::config::Config;
use crate::error::AppError;
use crate::logging::init_logging;
use crate::services::open_notify::OpenNotifyClient;
use crate::services::sunrise_sunset::SunriseSunsetClient;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let config = Config::from_env()
        .map_err(AppError::Config)
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });

    tracing::info!(
        "Service started (observer: {}, tolerance: {} deg, interval: {}s)",
        config.observer,
        config.tolerance_degrees,
        config.poll_interval_seconds
    );

    let position_provider = OpenNotifyClient::new(config.iss_api_url.clone())
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });
    let daylight_provider = SunriseSunsetClient::new(config.sunrise_sunset_api_url.clone())
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });
    let transport = SmtpMailTransport::new(&config.smtp).unwrap_or_else(|err| {
        tracing::error!("SMTP setup failed: {}", err);
        std::process::exit(1);
    });

    scheduler::run_sighting_loop(
        Arc::new(position_provider),
        Arc::new(daylight_provider),
        EmailNotifier::new(transport),
        config.observer,
        config.tolerance_degrees,
        config.poll_interval_seconds,
    )
    .await;
}
