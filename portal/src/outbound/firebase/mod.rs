//! Firebase outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `IdentityProvider`
//! port over the Identity Toolkit REST API.

mod dto;
mod http_provider;

pub use http_provider::{DEFAULT_IDENTITY_TOOLKIT_ENDPOINT, FirebaseIdentityProvider};
