//! Fake Store outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `ProductCatalogue`
//! port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_FAKESTORE_ENDPOINT, FakeStoreHttpCatalogue};
