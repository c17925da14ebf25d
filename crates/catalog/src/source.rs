//! Catalog sources.
//!
//! The filter and the cart never care where products come from; a source
//! only has to hand out a read-only ordered sequence at session start.

use vitrine_core::DomainResult;

use crate::product::{Color, Product, ProductId, Size};

/// Supplier of the static product list.
pub trait CatalogSource {
    /// Read-only ordered sequence of products.
    fn products(&self) -> &[Product];
}

/// In-memory catalog.
///
/// Intended for embedded/demo data and tests; a real deployment would load
/// the same shape from elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The monochrome demo collection.
    pub fn demo() -> DomainResult<Self> {
        let products = vec![
            Product::new(
                ProductId(1),
                "Classic Black T-Shirt",
                2500,
                Some(3200),
                "/img/bf0cf3f6-a40f-4c02-b7f8-efc978ce9016.jpg",
                vec![Size::Xs, Size::S, Size::M, Size::L, Size::Xl],
                vec![Color::Black, Color::White, Color::Gray],
                "MINIMAL",
                "T-Shirts",
            )?,
            Product::new(
                ProductId(2),
                "Minimalist Blazer",
                12_000,
                None,
                "/img/dc406f39-f62b-48b1-bdf1-1c6da8e92ecf.jpg",
                vec![Size::S, Size::M, Size::L, Size::Xl],
                vec![Color::White, Color::Black, Color::Gray],
                "ELEGANCE",
                "Blazers",
            )?,
            Product::new(
                ProductId(3),
                "Tailored Trousers",
                6500,
                Some(8000),
                "/img/212dde72-6838-4908-b777-69980eb17084.jpg",
                vec![Size::S, Size::M, Size::L, Size::Xl, Size::Xxl],
                vec![Color::Black, Color::Gray, Color::White],
                "CLASSIC",
                "Trousers",
            )?,
        ];

        Ok(Self::new(products))
    }
}

impl CatalogSource for InMemoryCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }
}

/// Distinct brand labels in first-seen order, for filter controls.
pub fn brands(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.iter().any(|b| b == product.brand()) {
            seen.push(product.brand().to_string());
        }
    }
    seen
}

/// Distinct category labels in first-seen order, for filter controls.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.iter().any(|c| c == product.category()) {
            seen.push(product.category().to_string());
        }
    }
    seen
}
