//! Sunrise-Sunset.org client
//!
//! Fetches today's sunrise and sunset for the observer's coordinates.
//! The `formatted=0` query selects ISO8601 output; only the hour and
//! minute fields are kept, the date and seconds are discarded.

use async_trait::async_trait;
use chrono::{DateTime, Timelike};
use reqwest::Client;
use serde::Deserialize;

use crate::error::AppError;
use crate::services::open_notify::REQUEST_TIMEOUT;
use crate::sighting::provider::{DaylightProvider, ProviderError, ProviderResult};
use crate::sighting::types::{Coordinate, DaylightWindow, TimeOfDay};

#[derive(Clone)]
pub struct SunriseSunsetClient {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct SunriseSunsetResponse {
    results: SunriseSunsetResults,
}

#[derive(Debug, Deserialize)]
struct SunriseSunsetResults {
    sunrise: String,
    sunset: String,
}

impl SunriseSunsetClient {
    pub fn new(base_url: String) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::Config(format!("failed to build HTTP client: {}", err)))?;

        Ok(Self { base_url, http })
    }

    pub async fn fetch_daylight_window(
        &self,
        observer: Coordinate,
    ) -> Result<DaylightWindow, AppError> {
        let url = format!("{}/json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", observer.latitude.to_string()),
                ("lng", observer.longitude.to_string()),
                ("formatted", "0".to_string()),
            ])
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "sunrise-sunset returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .json::<SunriseSunsetResponse>()
            .await
            .map_err(|err| AppError::Parse(err.to_string()))?;

        Ok(DaylightWindow {
            sunrise: parse_time_of_day("sunrise", &body.results.sunrise)?,
            sunset: parse_time_of_day("sunset", &body.results.sunset)?,
        })
    }
}

/// Extract hour and minute from an ISO8601 timestamp, dropping everything
/// else.
fn parse_time_of_day(field: &str, raw: &str) -> Result<TimeOfDay, AppError> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|err| AppError::Parse(format!("invalid {} '{}': {}", field, raw, err)))?;

    Ok(TimeOfDay::new(parsed.hour() as u8, parsed.minute() as u8))
}

#[async_trait]
impl DaylightProvider for SunriseSunsetClient {
    async fn fetch_daylight(&self, observer: Coordinate) -> ProviderResult<DaylightWindow> {
        self.fetch_daylight_window(observer)
            .await
            .map_err(|err| match err {
                AppError::Parse(message) => ProviderError::FormatError { message },
                other => ProviderError::NetworkError {
                    message: other.to_string(),
                },
            })
    }

    fn provider_name(&self) -> &str {
        "sunrise-sunset"
    }
}
