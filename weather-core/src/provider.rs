use async_trait::async_trait;

use crate::{City, FetchError};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current-conditions payloads.
///
/// Implementations hand back the raw JSON body; status checks and field
/// extraction happen in [`crate::WeatherService`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_conditions(&self, city: City) -> Result<String, FetchError>;
}
