//! DTOs for decoding timeline API responses.
//!
//! Field names follow the API's lower-case spelling (`tempmax`, `windspeed`).

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{CurrentConditions, DailyForecast, Forecast};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TimelineDto {
    pub(super) resolved_address: String,
    pub(super) current_conditions: Option<ConditionsDto>,
    #[serde(default)]
    pub(super) days: Vec<DayDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ConditionsDto {
    pub(super) temp: Option<f64>,
    pub(super) humidity: Option<f64>,
    pub(super) windspeed: Option<f64>,
    pub(super) conditions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DayDto {
    pub(super) datetime: NaiveDate,
    pub(super) temp: f64,
    pub(super) tempmax: Option<f64>,
    pub(super) tempmin: Option<f64>,
    pub(super) conditions: Option<String>,
}

impl TimelineDto {
    /// Current conditions fall back to today's entry when the API omits them.
    pub(super) fn into_domain(self) -> Result<Forecast, String> {
        let days: Vec<DailyForecast> = self.days.into_iter().map(DayDto::into_domain).collect();
        let current = match self.current_conditions {
            Some(ConditionsDto {
                temp: Some(temp),
                humidity,
                windspeed,
                conditions,
            }) => CurrentConditions {
                temp,
                humidity,
                wind_speed: windspeed,
                conditions,
            },
            _ => {
                let today = days
                    .first()
                    .ok_or_else(|| "response has neither current conditions nor days".to_owned())?;
                CurrentConditions {
                    temp: today.temp,
                    humidity: None,
                    wind_speed: None,
                    conditions: today.conditions.clone(),
                }
            }
        };
        Ok(Forecast {
            resolved_address: self.resolved_address,
            current,
            days,
        })
    }
}

impl DayDto {
    fn into_domain(self) -> DailyForecast {
        DailyForecast {
            date: self.datetime,
            temp: self.temp,
            temp_max: self.tempmax,
            temp_min: self.tempmin,
            conditions: self.conditions,
        }
    }
}
