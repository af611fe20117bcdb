//! ISS Sighting Module
//!
//! Pure domain logic for deciding whether the station is overhead and
//! whether it is dark enough at the observer's location to see it.

pub mod evaluator;
pub mod provider;
pub mod types;

pub use provider::ProviderError;
pub use types::*;
