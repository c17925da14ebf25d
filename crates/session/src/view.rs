//! View models: plain data derived from domain state for rendering.

use serde::{Deserialize, Serialize};

use vitrine_cart::Cart;
use vitrine_catalog::{Color, Product, ProductId, Size};

use crate::config::StorefrontConfig;

/// One product tile in the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    /// Strikethrough price; suppressed when the variant hides discounts.
    pub original_price: Option<u64>,
    pub discount_percent: Option<u64>,
    pub image: String,
    pub sizes: Vec<Size>,
    pub colors: Vec<Color>,
    pub brand: String,
    pub category: String,
}

impl ProductCard {
    pub fn from_product(product: &Product, config: &StorefrontConfig) -> Self {
        Self {
            id: product.id_typed(),
            name: product.name().to_string(),
            price: product.price(),
            original_price: product.original_price().filter(|_| config.show_discounts),
            discount_percent: if config.show_discounts {
                product.discount_percent()
            } else {
                None
            },
            image: product.image().to_string(),
            sizes: product.sizes().to_vec(),
            colors: product.colors().to_vec(),
            brand: product.brand().to_string(),
            category: product.category().to_string(),
        }
    }

    /// First offered size and color — what the one-click buy button picks.
    pub fn default_selection(&self) -> Option<(Size, Color)> {
        Some((*self.sizes.first()?, *self.colors.first()?))
    }
}

/// One row in the cart drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineView {
    pub product_name: String,
    pub size: Size,
    pub color: Color,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
}

/// The rendered cart: rows plus the two aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total_price: u64,
    pub item_count: u32,
}

impl CartView {
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    product_name: line.product_name.clone(),
                    size: line.size,
                    color: line.color,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: line.line_total(),
                })
                .collect(),
            total_price: cart.total_price(),
            item_count: cart.total_item_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
