//! Portal configuration loaded via OrthoConfig.
//!
//! Every value is optional in the environment (`PORTAL_*`) and in config
//! files; accessors apply the defaults.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::DEFAULT_AUTH_TIMEOUT;
use crate::outbound::fakestore::DEFAULT_FAKESTORE_ENDPOINT;
use crate::outbound::firebase::DEFAULT_IDENTITY_TOOLKIT_ENDPOINT;
use crate::outbound::visual_crossing::{DEFAULT_UNIT_GROUP, DEFAULT_VISUAL_CROSSING_ENDPOINT};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Configuration problems detected when building adapters.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// An endpoint override is not a valid absolute URL.
    #[error("{name} is not a valid URL: {source}")]
    InvalidEndpoint {
        /// Setting name.
        name: &'static str,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// A value with no default was not provided.
    #[error("{name} must be set")]
    Missing {
        /// Environment variable to set.
        name: &'static str,
    },
}

/// Endpoints, credentials and timeouts for the outbound adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct PortalSettings {
    /// Identity Toolkit base URL override.
    pub identity_toolkit_endpoint: Option<String>,
    /// Firebase web API key.
    pub firebase_api_key: Option<String>,
    /// Fake Store base URL override.
    pub fakestore_endpoint: Option<String>,
    /// Weather timeline base URL override.
    pub weather_endpoint: Option<String>,
    /// Weather API key.
    pub weather_api_key: Option<String>,
    /// Weather unit group (`us`, `metric`, `uk` or `base`).
    pub weather_unit_group: Option<String>,
    /// Per-request HTTP timeout in seconds.
    pub http_timeout_secs: Option<u64>,
    /// Budget for one auth submission in seconds.
    pub auth_timeout_secs: Option<u64>,
}

impl PortalSettings {
    /// Identity Toolkit base URL.
    pub fn identity_toolkit_endpoint(&self) -> Result<Url, SettingsError> {
        parse_endpoint(
            "PORTAL_IDENTITY_TOOLKIT_ENDPOINT",
            self.identity_toolkit_endpoint.as_deref(),
            DEFAULT_IDENTITY_TOOLKIT_ENDPOINT,
        )
    }

    /// Fake Store base URL.
    pub fn fakestore_endpoint(&self) -> Result<Url, SettingsError> {
        parse_endpoint(
            "PORTAL_FAKESTORE_ENDPOINT",
            self.fakestore_endpoint.as_deref(),
            DEFAULT_FAKESTORE_ENDPOINT,
        )
    }

    /// Weather timeline base URL.
    pub fn weather_endpoint(&self) -> Result<Url, SettingsError> {
        parse_endpoint(
            "PORTAL_WEATHER_ENDPOINT",
            self.weather_endpoint.as_deref(),
            DEFAULT_VISUAL_CROSSING_ENDPOINT,
        )
    }

    /// Firebase web API key, required for any auth command.
    pub fn firebase_api_key(&self) -> Result<&str, SettingsError> {
        required("PORTAL_FIREBASE_API_KEY", self.firebase_api_key.as_deref())
    }

    /// Weather API key, required for the weather command.
    pub fn weather_api_key(&self) -> Result<&str, SettingsError> {
        required("PORTAL_WEATHER_API_KEY", self.weather_api_key.as_deref())
    }

    /// Weather unit group, falling back to `us`.
    pub fn weather_unit_group(&self) -> &str {
        self.weather_unit_group
            .as_deref()
            .unwrap_or(DEFAULT_UNIT_GROUP)
    }

    /// Per-request HTTP timeout, falling back to ten seconds.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    /// Auth submission budget, falling back to thirty seconds.
    pub fn auth_timeout(&self) -> Duration {
        self.auth_timeout_secs
            .map_or(DEFAULT_AUTH_TIMEOUT, Duration::from_secs)
    }
}

fn parse_endpoint(
    name: &'static str,
    configured: Option<&str>,
    default: &str,
) -> Result<Url, SettingsError> {
    let mut url = Url::parse(configured.unwrap_or(default))
        .map_err(|source| SettingsError::InvalidEndpoint { name, source })?;
    // Adapters resolve relative paths against the base, which needs a
    // trailing slash to keep its last segment.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn required<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, SettingsError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::Missing { name })
}
