//! Weather lookup: location input, forecast records, temperature trend.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::ports::WeatherSource;

/// Location searched when the viewer opens.
pub const DEFAULT_LOCATION: &str = "Surat";

/// Number of days plotted in the temperature trend.
pub const TREND_DAYS: usize = 7;

/// Validation errors for [`WeatherLocation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherLocationError {
    /// Location was blank once trimmed.
    Empty,
}

impl fmt::Display for WeatherLocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "enter a city name"),
        }
    }
}

impl std::error::Error for WeatherLocationError {}

/// Free-text place name passed to the weather API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherLocation(String);

impl WeatherLocation {
    /// Validate a raw place name.
    pub fn new(raw: &str) -> Result<Self, WeatherLocationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WeatherLocationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl Default for WeatherLocation {
    fn default() -> Self {
        Self(DEFAULT_LOCATION.to_owned())
    }
}

impl AsRef<str> for WeatherLocation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeatherLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Conditions right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// Temperature in the requested unit group.
    pub temp: f64,
    /// Relative humidity, percent.
    pub humidity: Option<f64>,
    /// Wind speed in the requested unit group.
    pub wind_speed: Option<f64>,
    /// Short description such as "Partially cloudy".
    pub conditions: Option<String>,
}

/// One day of the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Calendar date at the location.
    pub date: NaiveDate,
    /// Mean temperature.
    pub temp: f64,
    /// Daily maximum.
    pub temp_max: Option<f64>,
    /// Daily minimum.
    pub temp_min: Option<f64>,
    /// Short description.
    pub conditions: Option<String>,
}

/// One point of the temperature chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// X axis.
    pub date: NaiveDate,
    /// Y axis.
    pub temp: f64,
}

/// Forecast for a resolved location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    /// Address the API matched the query to.
    pub resolved_address: String,
    /// Conditions right now.
    pub current: CurrentConditions,
    /// Daily series in date order.
    pub days: Vec<DailyForecast>,
}

impl Forecast {
    /// First [`TREND_DAYS`] days as chart points.
    pub fn trend(&self) -> Vec<TrendPoint> {
        self.days
            .iter()
            .take(TREND_DAYS)
            .map(|day| TrendPoint {
                date: day.date,
                temp: day.temp,
            })
            .collect()
    }
}

/// Message shown when the weather API call fails for any reason.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data";

/// What the viewer currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WeatherView {
    /// Nothing searched yet.
    #[default]
    Empty,
    /// Latest successful lookup.
    Loaded(Forecast),
    /// Latest lookup failed; the message is shown inline.
    Failed(String),
}

/// Search box plus result panel.
///
/// A failed search replaces any earlier forecast so stale data is never shown
/// under a new query.
pub struct WeatherViewer<S: ?Sized> {
    source: std::sync::Arc<S>,
    view: WeatherView,
}

impl<S> WeatherViewer<S>
where
    S: WeatherSource + ?Sized,
{
    /// Viewer with nothing loaded.
    pub fn new(source: std::sync::Arc<S>) -> Self {
        Self {
            source,
            view: WeatherView::Empty,
        }
    }

    /// Current panel contents.
    pub fn view(&self) -> &WeatherView {
        &self.view
    }

    /// Look up `raw` and replace the panel contents.
    pub async fn search(&mut self, raw: &str) -> &WeatherView {
        self.view = match WeatherLocation::new(raw) {
            Err(error) => WeatherView::Failed(error.to_string()),
            Ok(location) => match self.source.fetch_forecast(&location).await {
                Ok(forecast) => {
                    info!(%location, days = forecast.days.len(), "forecast loaded");
                    WeatherView::Loaded(forecast)
                }
                Err(error) => {
                    debug!(%location, %error, "forecast lookup failed");
                    WeatherView::Failed(FETCH_FAILED_MESSAGE.to_owned())
                }
            },
        };
        &self.view
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn forecast(days: u32) -> Forecast {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        Forecast {
            resolved_address: "Surat, Gujarat, India".to_owned(),
            current: CurrentConditions {
                temp: 88.0,
                humidity: Some(40.0),
                wind_speed: Some(7.2),
                conditions: Some("Clear".to_owned()),
            },
            days: (0..days)
                .map(|offset| DailyForecast {
                    date: start + chrono::Days::new(u64::from(offset)),
                    temp: 80.0 + f64::from(offset),
                    temp_max: None,
                    temp_min: None,
                    conditions: None,
                })
                .collect(),
        }
    }

    #[rstest]
    #[case(15, 7)]
    #[case(7, 7)]
    #[case(3, 3)]
    #[case(0, 0)]
    fn trend_keeps_at_most_a_week(#[case] days: u32, #[case] expected: usize) {
        let trend = forecast(days).trend();
        assert_eq!(trend.len(), expected);
        if let Some(first) = trend.first() {
            assert_eq!(first.temp, 80.0);
        }
    }

    #[rstest]
    #[case("  London ", Ok("London"))]
    #[case("", Err(WeatherLocationError::Empty))]
    #[case("   ", Err(WeatherLocationError::Empty))]
    fn locations_are_trimmed_and_required(
        #[case] raw: &str,
        #[case] expected: Result<&str, WeatherLocationError>,
    ) {
        let parsed = WeatherLocation::new(raw).map(|location| location.to_string());
        assert_eq!(parsed, expected.map(str::to_owned));
    }

    #[tokio::test]
    async fn viewer_shows_the_latest_result() {
        let mut source = crate::domain::ports::MockWeatherSource::new();
        source
            .expect_fetch_forecast()
            .withf(|location| location.as_ref() == "Surat")
            .times(1)
            .returning(|_| Ok(forecast(10)));
        source
            .expect_fetch_forecast()
            .withf(|location| location.as_ref() == "Atlantis")
            .times(1)
            .returning(|_| {
                Err(crate::domain::ports::WeatherSourceError::invalid_request(
                    "status 400: Invalid location",
                ))
            });

        let mut viewer = WeatherViewer::new(std::sync::Arc::new(source));
        assert_eq!(viewer.view(), &WeatherView::Empty);

        let loaded = viewer.search(" Surat ").await;
        assert!(matches!(loaded, WeatherView::Loaded(f) if f.trend().len() == TREND_DAYS));

        let failed = viewer.search("Atlantis").await;
        assert_eq!(failed, &WeatherView::Failed(FETCH_FAILED_MESSAGE.to_owned()));
    }

    #[tokio::test]
    async fn blank_search_never_reaches_the_source() {
        let mut source = crate::domain::ports::MockWeatherSource::new();
        source.expect_fetch_forecast().never();

        let mut viewer = WeatherViewer::new(std::sync::Arc::new(source));
        let view = viewer.search("  ").await;
        assert_eq!(view, &WeatherView::Failed("enter a city name".to_owned()));
    }

    #[test]
    fn default_location_is_surat() {
        assert_eq!(WeatherLocation::default().as_ref(), DEFAULT_LOCATION);
    }
}
