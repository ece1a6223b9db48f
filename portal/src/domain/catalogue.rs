//! Product catalogue records and the paginated product table.
//!
//! The table loads the catalogue once through [`ProductCatalogue`] and then
//! works purely on the in-memory result via [`Paginator`].

use std::fmt;

use pagination::{PageSize, PageWindow, Paginator};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::ports::{ProductCatalogue, ProductCatalogueError};

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductRating {
    /// Average score.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// One catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalogue id.
    pub id: u32,
    /// Product title.
    pub title: String,
    /// Unit price in dollars.
    pub price: f64,
    /// Product image.
    pub image_url: String,
    /// Category label.
    pub category: String,
    /// Rating summary, when the API provides one.
    pub rating: Option<ProductRating>,
}

/// Price rendered as `$x.xx`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(pub f64);

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// One table row as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    /// `#` column.
    pub id: u32,
    /// Image column.
    pub image_url: String,
    /// Title column.
    pub title: String,
    /// Price column, already formatted.
    pub price: String,
    /// Category column.
    pub category: String,
}

/// Pager controls under the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pager {
    /// "First" and "previous" links are disabled.
    pub at_start: bool,
    /// "Next" and "last" links are disabled.
    pub at_end: bool,
    /// Numbered links.
    pub pages: Vec<PageLink>,
}

/// One numbered pager link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    /// Page number.
    pub page: usize,
    /// Whether this is the current page.
    pub active: bool,
}

/// Paginated product table.
#[derive(Debug, Clone, Default)]
pub struct ProductTable {
    paginator: Paginator<Product>,
}

impl ProductTable {
    /// Build a table over products already in memory.
    pub fn new(products: Vec<Product>, page_size: PageSize) -> Self {
        Self {
            paginator: Paginator::new(products, page_size),
        }
    }

    /// Fetch the catalogue once and start on page 1.
    pub async fn load<C>(catalogue: &C, page_size: PageSize) -> Result<Self, ProductCatalogueError>
    where
        C: ProductCatalogue + ?Sized,
    {
        let products = catalogue.list_products().await.inspect_err(|error| {
            debug!(%error, "product catalogue load failed");
        })?;
        info!(count = products.len(), %page_size, "product catalogue loaded");
        Ok(Self::new(products, page_size))
    }

    /// Navigation state.
    pub fn paginator(&self) -> &Paginator<Product> {
        &self.paginator
    }

    /// Navigation state for page changes.
    pub fn paginator_mut(&mut self) -> &mut Paginator<Product> {
        &mut self.paginator
    }

    /// Rows on the current page.
    pub fn rows(&self) -> Vec<ProductRow> {
        self.paginator
            .visible_page()
            .iter()
            .map(|product| ProductRow {
                id: product.id,
                image_url: product.image_url.clone(),
                title: product.title.clone(),
                price: Price(product.price).to_string(),
                category: product.category.clone(),
            })
            .collect()
    }

    /// "Showing X to Y of Z entries".
    pub fn summary(&self) -> String {
        let PageWindow { first, last, total } = self.paginator.window();
        format!("Showing {first} to {last} of {total} entries")
    }

    /// Pager controls for the current page.
    pub fn pager(&self) -> Pager {
        let current = self.paginator.current_page();
        Pager {
            at_start: !self.paginator.has_previous(),
            at_end: !self.paginator.has_next(),
            pages: self
                .paginator
                .page_numbers()
                .map(|page| PageLink {
                    page,
                    active: page == current,
                })
                .collect(),
        }
    }
}
