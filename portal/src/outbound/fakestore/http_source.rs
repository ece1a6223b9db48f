//! Reqwest-backed Fake Store catalogue adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{ProductDto, into_domain_products};
use crate::domain::Product;
use crate::domain::ports::{ProductCatalogue, ProductCatalogueError};
use crate::outbound::http::{is_timeout_status, status_message};

/// Public Fake Store API root.
pub const DEFAULT_FAKESTORE_ENDPOINT: &str = "https://fakestoreapi.com/";

/// Catalogue adapter issuing `GET /products` against one endpoint.
pub struct FakeStoreHttpCatalogue {
    client: Client,
    endpoint: Url,
}

impl FakeStoreHttpCatalogue {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    fn products_url(&self) -> Result<Url, ProductCatalogueError> {
        self.endpoint
            .join("products")
            .map_err(|err| ProductCatalogueError::transport(format!("invalid endpoint: {err}")))
    }
}

#[async_trait]
impl ProductCatalogue for FakeStoreHttpCatalogue {
    async fn list_products(&self) -> Result<Vec<Product>, ProductCatalogueError> {
        let response = self
            .client
            .get(self.products_url()?)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, body.as_ref());
            debug!(%status, %error, "product catalogue call failed");
            return Err(error);
        }
        parse_products(body.as_ref())
    }
}

fn parse_products(body: &[u8]) -> Result<Vec<Product>, ProductCatalogueError> {
    let decoded: Vec<ProductDto> = serde_json::from_slice(body).map_err(|error| {
        ProductCatalogueError::decode(format!("invalid product JSON payload: {error}"))
    })?;
    into_domain_products(decoded).map_err(ProductCatalogueError::decode)
}

fn map_transport_error(error: reqwest::Error) -> ProductCatalogueError {
    if error.is_timeout() {
        ProductCatalogueError::timeout(error.to_string())
    } else {
        ProductCatalogueError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ProductCatalogueError {
    let message = status_message(status, body);
    if is_timeout_status(status) {
        ProductCatalogueError::timeout(message)
    } else if status.is_client_error() {
        ProductCatalogueError::rejected(message)
    } else {
        ProductCatalogueError::transport(message)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network Fake Store helpers.

    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_products_into_domain_records() {
        let body = r#"[
            {
                "id": 1,
                "title": "Fjallraven Backpack",
                "price": 109.95,
                "description": "Your perfect pack",
                "category": "men's clothing",
                "image": "https://fakestoreapi.com/img/81fPKd-2AYL.jpg",
                "rating": { "rate": 3.9, "count": 120 }
            },
            { "id": 2, "title": "Mens Casual T-Shirt", "price": 22.3 }
        ]"#;

        let products = parse_products(body.as_bytes()).expect("JSON should decode");
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].image_url, "https://fakestoreapi.com/img/81fPKd-2AYL.jpg");
        assert_eq!(products[0].rating.map(|rating| rating.count), Some(120));
        assert_eq!(products[1].category, "");
        assert_eq!(products[1].rating, None);
    }

    #[rstest]
    #[case(r#"[{ "id": 3, "title": "Broken", "price": -1.0 }]"#)]
    #[case(r#"{ "products": [] }"#)]
    fn rejects_malformed_payloads(#[case] body: &str) {
        let error = parse_products(body.as_bytes()).expect_err("decode should fail");
        assert!(matches!(error, ProductCatalogueError::Decode { .. }));
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, "Timeout")]
    #[case::not_found(StatusCode::NOT_FOUND, "Rejected")]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "Rejected")]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY, "Transport")]
    fn maps_http_statuses_to_port_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, b"");
        let variant = match error {
            ProductCatalogueError::Timeout { .. } => "Timeout",
            ProductCatalogueError::Rejected { .. } => "Rejected",
            ProductCatalogueError::Transport { .. } => "Transport",
            ProductCatalogueError::Decode { .. } => "Decode",
        };
        assert_eq!(variant, expected);
    }

    #[test]
    fn products_url_resolves_under_the_endpoint() {
        let endpoint = Url::parse(DEFAULT_FAKESTORE_ENDPOINT).expect("endpoint");
        let catalogue =
            FakeStoreHttpCatalogue::new(endpoint, Duration::from_secs(5)).expect("client builds");
        assert_eq!(
            catalogue.products_url().expect("url").as_str(),
            "https://fakestoreapi.com/products"
        );
    }
}
