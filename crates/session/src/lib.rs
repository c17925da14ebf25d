//! Storefront session layer.
//!
//! Owns the per-session state the presentation layer renders from (catalog
//! snapshot, active filter criteria, cart) and exposes it as plain data.
//! No UI framework types cross this boundary.

pub mod config;
pub mod session;
pub mod view;

pub use config::StorefrontConfig;
pub use session::Storefront;
pub use view::{CartLineView, CartView, ProductCard};
