//! Visual Crossing outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `WeatherSource`
//! port over the timeline API.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_UNIT_GROUP, DEFAULT_VISUAL_CROSSING_ENDPOINT, VisualCrossingHttpSource};
