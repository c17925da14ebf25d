use chrono::Utc;
use tracing::{debug, info};

use vitrine_cart::{AddItem, Cart, CartCommand, CartId, RemoveItem};
use vitrine_catalog::{
    brands, categories, filter_products, CatalogSource, Color, FilterCriteria, Product,
    ProductId, Size,
};
use vitrine_core::{Aggregate, AggregateId, DomainError, DomainResult, SessionId};

use crate::config::StorefrontConfig;
use crate::view::{CartView, ProductCard};

/// One open storefront session.
///
/// Owns the catalog snapshot, the active filter criteria and the cart. Every
/// operation is synchronous and runs to completion before the next begins;
/// cart mutations go through the command/event pipeline, so a failed command
/// leaves the cart exactly as it was.
#[derive(Debug, Clone)]
pub struct Storefront {
    session_id: SessionId,
    config: StorefrontConfig,
    products: Vec<Product>,
    criteria: FilterCriteria,
    cart: Cart,
}

impl Storefront {
    /// Open a session against a catalog source.
    ///
    /// The product list is snapshotted once; the source is not consulted
    /// again for the lifetime of the session.
    pub fn open(source: &impl CatalogSource, config: StorefrontConfig) -> Self {
        let session_id = SessionId::new();
        let cart = Cart::empty(CartId::new(AggregateId::new()));
        let products = source.products().to_vec();

        info!(
            %session_id,
            cart_id = %cart.id_typed(),
            products = products.len(),
            "storefront session opened"
        );

        Self {
            session_id,
            config,
            products,
            criteria: FilterCriteria::default(),
            cart,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The full catalog snapshot, unfiltered.
    pub fn catalog(&self) -> &[Product] {
        &self.products
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the active filter criteria wholesale.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        debug!(session_id = %self.session_id, ?criteria, "filter criteria updated");
        self.criteria = criteria;
    }

    /// Back to the defaults, as the "reset filters" control does.
    pub fn reset_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Apply raw price-bound input from the presentation layer.
    ///
    /// Non-numeric input falls back to the default bound; it never errors.
    pub fn set_price_bounds_from_input(&mut self, min: &str, max: &str) {
        self.criteria.min_price = FilterCriteria::min_bound_from_input(min);
        self.criteria.max_price = FilterCriteria::max_bound_from_input(max);
        debug!(
            session_id = %self.session_id,
            min_price = self.criteria.min_price,
            max_price = self.criteria.max_price,
            "price bounds updated"
        );
    }

    /// Products matching the active criteria, catalog order preserved.
    pub fn filtered_products(&self) -> Vec<Product> {
        let result = filter_products(&self.products, &self.criteria);
        debug!(session_id = %self.session_id, matched = result.len(), "catalog filtered");
        result
    }

    /// Filtered products shaped for rendering under this session's config.
    pub fn product_cards(&self) -> Vec<ProductCard> {
        self.filtered_products()
            .iter()
            .map(|product| ProductCard::from_product(product, &self.config))
            .collect()
    }

    /// Distinct brand labels for the brand filter control.
    pub fn brands(&self) -> Vec<String> {
        brands(&self.products)
    }

    /// Distinct category labels for the category filter control.
    pub fn categories(&self) -> Vec<String> {
        categories(&self.products)
    }

    /// Put one unit of a product into the cart.
    ///
    /// Unknown product ids are a domain error; a size or color the product
    /// does not offer is rejected by the cart as an invalid selection.
    pub fn add_to_cart(&mut self, product_id: ProductId, size: Size, color: Color) -> DomainResult<()> {
        let product = self
            .products
            .iter()
            .find(|p| p.id_typed() == product_id)
            .cloned()
            .ok_or(DomainError::NotFound)?;

        let cmd = CartCommand::AddItem(AddItem {
            cart_id: self.cart.id_typed(),
            product,
            size,
            color,
            occurred_at: Utc::now(),
        });

        let events = self.cart.handle(&cmd)?;
        for event in &events {
            self.cart.apply(event);
        }

        debug!(
            session_id = %self.session_id,
            %product_id,
            items = self.cart.total_item_count(),
            "item added to cart"
        );
        Ok(())
    }

    /// Remove the line at the given rendered position.
    ///
    /// Out-of-range indexes are tolerated as stale references; the cart is
    /// left unchanged.
    pub fn remove_from_cart(&mut self, index: usize) -> DomainResult<()> {
        let cmd = CartCommand::RemoveItem(RemoveItem {
            cart_id: self.cart.id_typed(),
            index,
            occurred_at: Utc::now(),
        });

        let events = self.cart.handle(&cmd)?;
        for event in &events {
            self.cart.apply(event);
        }

        debug!(session_id = %self.session_id, index, lines = self.cart.len(), "cart line removal handled");
        Ok(())
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The cart shaped for the drawer.
    pub fn cart_view(&self) -> CartView {
        CartView::from_cart(&self.cart)
    }

    pub fn total_price(&self) -> u64 {
        self.cart.total_price()
    }

    pub fn item_count(&self) -> u32 {
        self.cart.total_item_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_catalog::InMemoryCatalog;

    fn open_demo() -> Storefront {
        let catalog = InMemoryCatalog::demo().unwrap();
        Storefront::open(&catalog, StorefrontConfig::full())
    }

    #[test]
    fn open_snapshots_catalog_and_starts_empty() {
        let storefront = open_demo();
        assert_eq!(storefront.catalog().len(), 3);
        assert!(storefront.cart().is_empty());
        assert_eq!(storefront.criteria(), &FilterCriteria::default());
    }

    #[test]
    fn add_to_cart_rejects_unknown_product() {
        let mut storefront = open_demo();
        let err = storefront
            .add_to_cart(ProductId(99), Size::M, Color::Black)
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
        assert!(storefront.cart().is_empty());
    }

    #[test]
    fn add_to_cart_rejects_unoffered_size_and_leaves_cart_unchanged() {
        let mut storefront = open_demo();
        // The blazer is not offered in XS.
        let err = storefront
            .add_to_cart(ProductId(2), Size::Xs, Color::White)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidSelection(_)));
        assert!(storefront.cart().is_empty());
    }

    #[test]
    fn price_bound_input_tolerance_applies_defaults() {
        let mut storefront = open_demo();
        storefront.set_price_bounds_from_input("not-a-number", "");
        assert_eq!(storefront.criteria().min_price, 0);
        assert_eq!(storefront.criteria().max_price, 15_000);

        storefront.set_price_bounds_from_input("3000", "9000");
        assert_eq!(storefront.criteria().min_price, 3000);
        assert_eq!(storefront.criteria().max_price, 9000);
    }

    #[test]
    fn reset_filters_restores_defaults() {
        let mut storefront = open_demo();
        storefront.set_criteria(FilterCriteria {
            brand: Some("MINIMAL".to_string()),
            min_price: 100,
            max_price: 200,
            ..FilterCriteria::default()
        });
        assert_eq!(storefront.filtered_products().len(), 0);

        storefront.reset_filters();
        assert_eq!(storefront.filtered_products().len(), 3);
    }

    #[test]
    fn filter_labels_come_from_the_catalog() {
        let storefront = open_demo();
        assert_eq!(storefront.brands(), vec!["MINIMAL", "ELEGANCE", "CLASSIC"]);
        assert_eq!(
            storefront.categories(),
            vec!["T-Shirts", "Blazers", "Trousers"]
        );
    }
}
