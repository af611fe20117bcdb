//! Data Provider Interfaces
//!
//! Abstraction layer between the scheduler and the concrete HTTP clients,
//! so tests can substitute scripted providers.

use async_trait::async_trait;
use thiserror::Error;

use crate::sighting::types::{Coordinate, DaylightWindow};

/// Errors from position and daylight providers.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Data format error: {message}")]
    FormatError { message: String },

    #[error("Service unavailable")]
    ServiceUnavailable,
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Source of the station's current geographic position.
#[async_trait]
pub trait IssPositionProvider {
    /// Fetch the station's current latitude/longitude.
    async fn fetch_position(&self) -> ProviderResult<Coordinate>;

    /// Get the name of this provider for logging/debugging
    fn provider_name(&self) -> &str;
}

/// Source of today's sunrise/sunset times at a given location.
#[async_trait]
pub trait DaylightProvider {
    /// Fetch the daylight window for the observer's coordinates.
    async fn fetch_daylight(&self, observer: Coordinate) -> ProviderResult<DaylightWindow>;

    /// Get the name of this provider for logging/debugging
    fn provider_name(&self) -> &str;
}
