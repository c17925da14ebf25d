use serde::{Deserialize, Serialize};

/// Presentation configuration for one storefront variant.
///
/// The catalog and cart logic is canonical and shared; variants differ only
/// in which filter controls they expose and how much pricing detail they
/// render. Flags here are advisory for the presentation layer — they do not
/// change filtering or cart semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    pub size_filter: bool,
    pub color_filter: bool,
    pub brand_filter: bool,
    pub category_filter: bool,
    pub price_filter: bool,
    pub show_discounts: bool,
    pub show_result_count: bool,
}

impl StorefrontConfig {
    /// The full storefront: every filter control, discount badges, result
    /// counting.
    pub fn full() -> Self {
        Self {
            size_filter: true,
            color_filter: true,
            brand_filter: true,
            category_filter: true,
            price_filter: true,
            show_discounts: true,
            show_result_count: true,
        }
    }

    /// The pared-down storefront: category and price filtering only, plain
    /// prices.
    pub fn minimal() -> Self {
        Self {
            size_filter: false,
            color_filter: false,
            brand_filter: false,
            category_filter: true,
            price_filter: true,
            show_discounts: false,
            show_result_count: false,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self::full()
    }
}
