//! Open Notify client
//!
//! Fetches the station's current position from the `iss-now.json`
//! endpoint. The API reports coordinates as strings, so parsing to `f64`
//! happens here and any malformed value surfaces as a parse error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::AppError;
use crate::sighting::provider::{IssPositionProvider, ProviderError, ProviderResult};
use crate::sighting::types::Coordinate;

/// Upper bound on any single API request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct OpenNotifyClient {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IssNowResponse {
    iss_position: IssPositionBody,
}

#[derive(Debug, Deserialize)]
struct IssPositionBody {
    latitude: String,
    longitude: String,
}

impl OpenNotifyClient {
    pub fn new(base_url: String) -> Result<Self, AppError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Override the request timeout. Production uses [`REQUEST_TIMEOUT`];
    /// tests shrink it so a stalled server fails fast.
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("failed to build HTTP client: {}", err)))?;

        Ok(Self { base_url, http })
    }

    pub async fn fetch_iss_now(&self) -> Result<Coordinate, AppError> {
        let url = format!("{}/iss-now.json", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "open-notify returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .json::<IssNowResponse>()
            .await
            .map_err(|err| AppError::Parse(err.to_string()))?;

        let latitude = parse_degrees("latitude", &body.iss_position.latitude)?;
        let longitude = parse_degrees("longitude", &body.iss_position.longitude)?;

        Ok(Coordinate::new(latitude, longitude))
    }
}

fn parse_degrees(field: &str, raw: &str) -> Result<f64, AppError> {
    raw.parse::<f64>()
        .map_err(|err| AppError::Parse(format!("invalid {} '{}': {}", field, raw, err)))
}

#[async_trait]
impl IssPositionProvider for OpenNotifyClient {
    async fn fetch_position(&self) -> ProviderResult<Coordinate> {
        self.fetch_iss_now().await.map_err(|err| match err {
            AppError::Parse(message) => ProviderError::FormatError { message },
            other => ProviderError::NetworkError {
                message: other.to_string(),
            },
        })
    }

    fn provider_name(&self) -> &str {
        "open-notify"
    }
}
