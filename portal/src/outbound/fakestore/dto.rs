//! DTOs for decoding Fake Store product listings.

use serde::Deserialize;

use crate::domain::{Product, ProductRating};

#[derive(Debug, Deserialize)]
pub(super) struct ProductDto {
    pub(super) id: u32,
    pub(super) title: String,
    pub(super) price: f64,
    #[serde(default)]
    pub(super) category: String,
    #[serde(default)]
    pub(super) image: String,
    pub(super) rating: Option<RatingDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RatingDto {
    pub(super) rate: f64,
    pub(super) count: u32,
}

pub(super) fn into_domain_products(products: Vec<ProductDto>) -> Result<Vec<Product>, String> {
    products.into_iter().map(ProductDto::into_domain).collect()
}

impl ProductDto {
    fn into_domain(self) -> Result<Product, String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("product {} has invalid price {}", self.id, self.price));
        }
        Ok(Product {
            id: self.id,
            title: self.title,
            price: self.price,
            image_url: self.image,
            category: self.category,
            rating: self.rating.map(|rating| ProductRating {
                rate: rating.rate,
                count: rating.count,
            }),
        })
    }
}
