//! Driven port for the product catalogue REST API.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Product;

define_port_error! {
    /// Errors surfaced while listing products.
    pub enum ProductCatalogueError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "product catalogue transport failed: {message}",
        /// Catalogue call exceeded timeout.
        Timeout { message: String } =>
            "product catalogue timeout: {message}",
        /// Catalogue rejected the request.
        Rejected { message: String } =>
            "product catalogue rejected request: {message}",
        /// Catalogue response could not be decoded.
        Decode { message: String } =>
            "product catalogue response decode failed: {message}",
    }
}

/// Port listing every product once per page load.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogue: Send + Sync {
    /// Fetch the full catalogue, in the order the API returns it.
    async fn list_products(&self) -> Result<Vec<Product>, ProductCatalogueError>;
}

/// Fixture catalogue returning a fixed list.
#[derive(Debug, Clone, Default)]
pub struct FixtureProductCatalogue {
    products: Vec<Product>,
}

impl FixtureProductCatalogue {
    /// Serve `products` verbatim.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductCatalogue for FixtureProductCatalogue {
    async fn list_products(&self) -> Result<Vec<Product>, ProductCatalogueError> {
        Ok(self.products.clone())
    }
}
