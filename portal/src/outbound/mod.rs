//! Outbound adapters implementing domain ports for external services.
//!
//! Each adapter is a thin reqwest translator:
//!
//! - **firebase**: Identity Toolkit REST API behind `IdentityProvider`
//! - **fakestore**: Fake Store product API behind `ProductCatalogue`
//! - **visual_crossing**: timeline weather API behind `WeatherSource`
//!
//! Adapters own request building, timeouts, HTTP status mapping and JSON
//! decoding. They contain no business logic.

pub mod fakestore;
pub mod firebase;
mod http;
pub mod visual_crossing;
