//! Driven ports for the hosted services the portal consumes.
//!
//! Each port owns its error enum so adapters can translate transport
//! failures without leaking `reqwest` types into the domain.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_provider;
mod product_catalogue;
mod weather_source;

#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use product_catalogue::MockProductCatalogue;
pub use product_catalogue::{FixtureProductCatalogue, ProductCatalogue, ProductCatalogueError};
#[cfg(test)]
pub use weather_source::MockWeatherSource;
pub use weather_source::{WeatherSource, WeatherSourceError};
