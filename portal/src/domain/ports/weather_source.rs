//! Driven port for the weather timeline REST API.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Forecast, WeatherLocation};

define_port_error! {
    /// Errors surfaced while fetching a forecast.
    pub enum WeatherSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "weather transport failed: {message}",
        /// Weather call exceeded timeout.
        Timeout { message: String } =>
            "weather timeout: {message}",
        /// Weather API rate-limited the request.
        RateLimited { message: String } =>
            "weather rate limited request: {message}",
        /// Weather API rejected the request, usually an unknown location.
        InvalidRequest { message: String } =>
            "weather request invalid: {message}",
        /// Weather response could not be decoded.
        Decode { message: String } =>
            "weather response decode failed: {message}",
    }
}

/// Port for on-demand forecast lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch current conditions and the daily series for `location`.
    async fn fetch_forecast(
        &self,
        location: &WeatherLocation,
    ) -> Result<Forecast, WeatherSourceError>;
}
