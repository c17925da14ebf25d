//! Catalog filtering rules.
//!
//! Filtering is a pure function over the product list: no side effects, no
//! hidden state, input order preserved. An empty result set is a valid
//! outcome, not an error.

use serde::{Deserialize, Serialize};

use vitrine_core::ValueObject;

use crate::product::{Color, Product, Size};

/// Lower price bound used when no constraint is set.
pub const DEFAULT_MIN_PRICE: u64 = 0;

/// Upper price bound used when no constraint is set.
pub const DEFAULT_MAX_PRICE: u64 = 15_000;

/// Active filter constraints. `None` means "no constraint".
///
/// `min_price <= max_price` is deliberately not enforced: out-of-order bounds
/// simply yield an empty result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub size: Option<Size>,
    pub color: Option<Color>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub min_price: u64,
    pub max_price: u64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            size: None,
            color: None,
            brand: None,
            category: None,
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
        }
    }
}

impl ValueObject for FilterCriteria {}

impl FilterCriteria {
    /// Criteria that match every product regardless of price.
    pub fn unconstrained() -> Self {
        Self {
            max_price: u64::MAX,
            ..Self::default()
        }
    }

    /// Whether a single product passes every active constraint.
    pub fn matches(&self, product: &Product) -> bool {
        self.size.is_none_or(|size| product.offers_size(size))
            && self.color.is_none_or(|color| product.offers_color(color))
            && self
                .brand
                .as_deref()
                .is_none_or(|brand| brand == product.brand())
            && self
                .category
                .as_deref()
                .is_none_or(|category| category == product.category())
            && product.price() >= self.min_price
            && product.price() <= self.max_price
    }

    /// Parse a lower price bound typed into the presentation layer.
    ///
    /// Non-numeric input falls back to the default bound rather than
    /// surfacing a parse error.
    pub fn min_bound_from_input(input: &str) -> u64 {
        input.trim().parse().unwrap_or(DEFAULT_MIN_PRICE)
    }

    /// Parse an upper price bound typed into the presentation layer.
    pub fn max_bound_from_input(input: &str) -> u64 {
        input.trim().parse().unwrap_or(DEFAULT_MAX_PRICE)
    }
}

/// Filter the catalog down to the products matching `criteria`.
///
/// Relative order of the input is preserved; products are never reordered,
/// duplicated or fabricated.
pub fn filter_products(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    products
        .iter()
        .filter(|product| criteria.matches(product))
        .cloned()
        .collect()
}
