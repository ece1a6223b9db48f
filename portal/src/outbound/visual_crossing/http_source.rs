//! Reqwest-backed timeline weather adapter.
//!
//! This adapter owns transport details only: URL building, timeout and HTTP
//! error mapping, and JSON decoding into a domain forecast.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::TimelineDto;
use crate::domain::ports::{WeatherSource, WeatherSourceError};
use crate::domain::{Forecast, WeatherLocation};
use crate::outbound::http::{is_timeout_status, status_message};

/// Public timeline endpoint. Locations are appended as one path segment.
pub const DEFAULT_VISUAL_CROSSING_ENDPOINT: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline/";

/// Fahrenheit, miles per hour.
pub const DEFAULT_UNIT_GROUP: &str = "us";

/// Weather adapter issuing `GET timeline/{location}`.
pub struct VisualCrossingHttpSource {
    client: Client,
    endpoint: Url,
    api_key: String,
    unit_group: String,
}

impl VisualCrossingHttpSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        unit_group: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            unit_group: unit_group.into(),
        })
    }

    fn timeline_url(&self, location: &WeatherLocation) -> Result<Url, WeatherSourceError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| WeatherSourceError::invalid_request("endpoint cannot carry a path"))?
            .pop_if_empty()
            .push(location.as_ref());
        url.query_pairs_mut()
            .append_pair("unitGroup", &self.unit_group)
            .append_pair("key", &self.api_key)
            .append_pair("contentType", "json");
        Ok(url)
    }
}

#[async_trait]
impl WeatherSource for VisualCrossingHttpSource {
    async fn fetch_forecast(
        &self,
        location: &WeatherLocation,
    ) -> Result<Forecast, WeatherSourceError> {
        let response = self
            .client
            .get(self.timeline_url(location)?)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, body.as_ref());
            debug!(%location, %status, %error, "weather call failed");
            return Err(error);
        }
        parse_forecast(body.as_ref())
    }
}

fn parse_forecast(body: &[u8]) -> Result<Forecast, WeatherSourceError> {
    let decoded: TimelineDto = serde_json::from_slice(body).map_err(|error| {
        WeatherSourceError::decode(format!("invalid timeline JSON payload: {error}"))
    })?;
    decoded.into_domain().map_err(WeatherSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> WeatherSourceError {
    if error.is_timeout() {
        WeatherSourceError::timeout(error.to_string())
    } else {
        WeatherSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> WeatherSourceError {
    let message = status_message(status, body);
    match status {
        StatusCode::TOO_MANY_REQUESTS => WeatherSourceError::rate_limited(message),
        _ if is_timeout_status(status) => WeatherSourceError::timeout(message),
        _ if status.is_client_error() => WeatherSourceError::invalid_request(message),
        _ => WeatherSourceError::transport(message),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network timeline helpers.

    use super::*;
    use rstest::rstest;

    fn source() -> VisualCrossingHttpSource {
        let endpoint = Url::parse(DEFAULT_VISUAL_CROSSING_ENDPOINT).expect("endpoint");
        VisualCrossingHttpSource::new(endpoint, "k3y", DEFAULT_UNIT_GROUP, Duration::from_secs(5))
            .expect("client builds")
    }

    #[test]
    fn timeline_url_encodes_the_location_segment() {
        let location = WeatherLocation::new("New York, NY").expect("location");
        let url = source().timeline_url(&location).expect("url");
        assert_eq!(
            url.as_str(),
            "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline/New%20York,%20NY?unitGroup=us&key=k3y&contentType=json"
        );
    }

    #[test]
    fn parses_timeline_into_forecast() {
        let body = r#"{
            "resolvedAddress": "Surat, Gujarat, India",
            "currentConditions": {
                "temp": 91.4, "humidity": 38.2, "windspeed": 6.9, "conditions": "Clear"
            },
            "days": [
                { "datetime": "2024-03-01", "temp": 88.1, "tempmax": 97.0, "tempmin": 77.2 },
                { "datetime": "2024-03-02", "temp": 87.5 }
            ]
        }"#;

        let forecast = parse_forecast(body.as_bytes()).expect("JSON should decode");
        assert_eq!(forecast.resolved_address, "Surat, Gujarat, India");
        assert_eq!(forecast.current.wind_speed, Some(6.9));
        assert_eq!(forecast.days.len(), 2);
        assert_eq!(forecast.days[0].temp_max, Some(97.0));
        assert_eq!(forecast.trend()[1].temp, 87.5);
    }

    #[test]
    fn missing_current_conditions_fall_back_to_today() {
        let body = r#"{
            "resolvedAddress": "Oslo, Norway",
            "days": [{ "datetime": "2024-01-10", "temp": 21.0, "conditions": "Snow" }]
        }"#;

        let forecast = parse_forecast(body.as_bytes()).expect("JSON should decode");
        assert_eq!(forecast.current.temp, 21.0);
        assert_eq!(forecast.current.conditions.as_deref(), Some("Snow"));
    }

    #[rstest]
    #[case(r#"{ "resolvedAddress": "Nowhere", "days": [] }"#)]
    #[case(r#"{ "resolvedAddress": "Bad", "days": [{ "datetime": "March", "temp": 1 }] }"#)]
    fn rejects_unusable_payloads(#[case] body: &str) {
        let error = parse_forecast(body.as_bytes()).expect_err("decode should fail");
        assert!(matches!(error, WeatherSourceError::Decode { .. }));
    }

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "RateLimited")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
    #[case::bad_request(StatusCode::BAD_REQUEST, "InvalidRequest")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Transport")]
    fn maps_http_statuses_to_port_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let variant = match map_status_error(status, b"Invalid location found") {
            WeatherSourceError::RateLimited { .. } => "RateLimited",
            WeatherSourceError::Timeout { .. } => "Timeout",
            WeatherSourceError::InvalidRequest { .. } => "InvalidRequest",
            WeatherSourceError::Transport { .. } => "Transport",
            WeatherSourceError::Decode { .. } => "Decode",
        };
        assert_eq!(variant, expected);
    }
}
