use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitrine_catalog::{Color, Product, ProductId, Size};
use vitrine_core::{Aggregate, AggregateId, AggregateRoot, DomainError};
use vitrine_events::Event;

/// Cart identifier (one cart per browsing session).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub AggregateId);

impl CartId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CartId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One cart entry: a product/size/color combination and its quantity.
///
/// Product name and unit price are snapshotted at add time so the cart stays
/// renderable without a catalog lookup. Two lines with the same
/// `(product_id, size, color)` key never coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub product_name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    pub size: Size,
    pub color: Color,
    pub quantity: u32,
}

impl LineItem {
    /// Deduplication key.
    pub fn key(&self) -> (ProductId, Size, Color) {
        (self.product_id, self.size, self.color)
    }

    /// Price of this line: unit price times quantity.
    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// Aggregate root: Cart.
///
/// Created empty at session start, mutated only through commands, discarded
/// at session end. Insertion order of lines is preserved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: CartId,
    lines: Vec<LineItem>,
    version: u64,
}

impl Cart {
    /// Create an empty cart. Carts need no create command; a session opens
    /// with one already usable.
    pub fn empty(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            version: 0,
        }
    }

    /// Rebuild a cart from a persisted snapshot.
    pub fn restore(id: CartId, lines: Vec<LineItem>, version: u64) -> Self {
        Self { id, lines, version }
    }

    pub fn id_typed(&self) -> CartId {
        self.id
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `unit_price x quantity` over all lines. Zero for an empty cart.
    pub fn total_price(&self) -> u64 {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities over all lines. Zero for an empty cart.
    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

impl AggregateRoot for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub cart_id: CartId,
    pub product: Product,
    pub size: Size,
    pub color: Color,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub cart_id: CartId,
    /// Ordinal position in the rendered line list.
    pub index: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: u64,
    pub size: Size,
    pub color: Color,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemQuantityIncreased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuantityIncreased {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub size: Size,
    pub color: Color,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub cart_id: CartId,
    pub index: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    ItemQuantityIncreased(ItemQuantityIncreased),
    ItemRemoved(ItemRemoved),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item.added",
            CartEvent::ItemQuantityIncreased(_) => "cart.item.quantity_increased",
            CartEvent::ItemRemoved(_) => "cart.item.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::ItemQuantityIncreased(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                self.lines.push(LineItem {
                    product_id: e.product_id,
                    product_name: e.product_name.clone(),
                    unit_price: e.unit_price,
                    size: e.size,
                    color: e.color,
                    quantity: 1,
                });
            }
            CartEvent::ItemQuantityIncreased(e) => {
                let key = (e.product_id, e.size, e.color);
                if let Some(line) = self.lines.iter_mut().find(|line| line.key() == key) {
                    line.quantity += 1;
                }
            }
            CartEvent::ItemRemoved(e) => {
                if e.index < self.lines.len() {
                    self.lines.remove(e.index);
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add_item(cmd),
            CartCommand::RemoveItem(cmd) => self.handle_remove_item(cmd),
        }
    }
}

impl Cart {
    fn ensure_cart_id(&self, cart_id: CartId) -> Result<(), DomainError> {
        if self.id != cart_id {
            return Err(DomainError::invariant("cart_id mismatch"));
        }
        Ok(())
    }

    fn handle_add_item(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_cart_id(cmd.cart_id)?;

        if !cmd.product.offers_size(cmd.size) {
            return Err(DomainError::invalid_selection(format!(
                "size {} is not offered for '{}'",
                cmd.size,
                cmd.product.name()
            )));
        }

        if !cmd.product.offers_color(cmd.color) {
            return Err(DomainError::invalid_selection(format!(
                "color {} is not offered for '{}'",
                cmd.color,
                cmd.product.name()
            )));
        }

        let key = (cmd.product.id_typed(), cmd.size, cmd.color);
        if self.lines.iter().any(|line| line.key() == key) {
            // No upper bound on quantity.
            return Ok(vec![CartEvent::ItemQuantityIncreased(
                ItemQuantityIncreased {
                    cart_id: cmd.cart_id,
                    product_id: cmd.product.id_typed(),
                    size: cmd.size,
                    color: cmd.color,
                    occurred_at: cmd.occurred_at,
                },
            )]);
        }

        Ok(vec![CartEvent::ItemAdded(ItemAdded {
            cart_id: cmd.cart_id,
            product_id: cmd.product.id_typed(),
            product_name: cmd.product.name().to_string(),
            unit_price: cmd.product.price(),
            size: cmd.size,
            color: cmd.color,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_item(&self, cmd: &RemoveItem) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_cart_id(cmd.cart_id)?;

        // Indexes come from a previously rendered list that may have shifted;
        // a stale out-of-range index is tolerated, not an error.
        if cmd.index >= self.lines.len() {
            return Ok(Vec::new());
        }

        Ok(vec![CartEvent::ItemRemoved(ItemRemoved {
            cart_id: cmd.cart_id,
            index: cmd.index,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::AggregateId;

    fn test_cart_id() -> CartId {
        CartId::new(AggregateId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn tee() -> Product {
        Product::new(
            ProductId(1),
            "Classic Black T-Shirt",
            2500,
            Some(3200),
            "/img/tee.jpg",
            vec![Size::Xs, Size::S, Size::M, Size::L],
            vec![Color::Black, Color::White],
            "MINIMAL",
            "T-Shirts",
        )
        .unwrap()
    }

    fn blazer() -> Product {
        Product::new(
            ProductId(2),
            "Minimalist Blazer",
            12_000,
            None,
            "/img/blazer.jpg",
            vec![Size::S, Size::M, Size::L],
            vec![Color::White, Color::Gray],
            "ELEGANCE",
            "Blazers",
        )
        .unwrap()
    }

    fn add(cart: &mut Cart, product: Product, size: Size, color: Color) {
        let cmd = CartCommand::AddItem(AddItem {
            cart_id: cart.id_typed(),
            product,
            size,
            color,
            occurred_at: test_time(),
        });
        let events = cart.handle(&cmd).unwrap();
        for event in &events {
            cart.apply(event);
        }
    }

    fn remove(cart: &mut Cart, index: usize) {
        let cmd = CartCommand::RemoveItem(RemoveItem {
            cart_id: cart.id_typed(),
            index,
            occurred_at: test_time(),
        });
        let events = cart.handle(&cmd).unwrap();
        for event in &events {
            cart.apply(event);
        }
    }

    #[test]
    fn add_item_emits_item_added_with_product_snapshot() {
        let cart = Cart::empty(test_cart_id());
        let cmd = CartCommand::AddItem(AddItem {
            cart_id: cart.id_typed(),
            product: tee(),
            size: Size::M,
            color: Color::Black,
            occurred_at: test_time(),
        });

        let events = cart.handle(&cmd).unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            CartEvent::ItemAdded(e) => {
                assert_eq!(e.product_id, ProductId(1));
                assert_eq!(e.product_name, "Classic Black T-Shirt");
                assert_eq!(e.unit_price, 2500);
                assert_eq!(e.size, Size::M);
                assert_eq!(e.color, Color::Black);
            }
            other => panic!("expected ItemAdded, got {other:?}"),
        }
    }

    #[test]
    fn adding_same_selection_twice_increments_quantity() {
        let mut cart = Cart::empty(test_cart_id());
        add(&mut cart, tee(), Size::M, Color::Black);
        add(&mut cart, tee(), Size::M, Color::Black);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn adding_two_sizes_of_one_product_keeps_two_lines() {
        let mut cart = Cart::empty(test_cart_id());
        add(&mut cart, tee(), Size::M, Color::Black);
        add(&mut cart, tee(), Size::L, Color::Black);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].size, Size::M);
        assert_eq!(cart.lines()[1].size, Size::L);
    }

    #[test]
    fn adding_two_colors_of_one_product_keeps_two_lines() {
        let mut cart = Cart::empty(test_cart_id());
        add(&mut cart, tee(), Size::M, Color::Black);
        add(&mut cart, tee(), Size::M, Color::White);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn add_item_rejects_size_not_offered() {
        let cart = Cart::empty(test_cart_id());
        let cmd = CartCommand::AddItem(AddItem {
            cart_id: cart.id_typed(),
            product: tee(),
            size: Size::Xxl,
            color: Color::Black,
            occurred_at: test_time(),
        });

        let err = cart.handle(&cmd).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSelection(_)));
    }

    #[test]
    fn add_item_rejects_color_not_offered() {
        let cart = Cart::empty(test_cart_id());
        let cmd = CartCommand::AddItem(AddItem {
            cart_id: cart.id_typed(),
            product: tee(),
            size: Size::M,
            color: Color::Gray,
            occurred_at: test_time(),
        });

        let err = cart.handle(&cmd).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSelection(_)));
    }

    #[test]
    fn commands_reject_cart_id_mismatch() {
        let cart = Cart::empty(test_cart_id());
        let cmd = CartCommand::AddItem(AddItem {
            cart_id: test_cart_id(),
            product: tee(),
            size: Size::M,
            color: Color::Black,
            occurred_at: test_time(),
        });

        let err = cart.handle(&cmd).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn remove_item_out_of_range_is_a_noop() {
        let mut cart = Cart::empty(test_cart_id());
        add(&mut cart, tee(), Size::M, Color::Black);
        let before = cart.clone();

        for stale in [cart.len(), cart.len() + 1, usize::MAX] {
            let cmd = CartCommand::RemoveItem(RemoveItem {
                cart_id: cart.id_typed(),
                index: stale,
                occurred_at: test_time(),
            });
            let events = cart.handle(&cmd).unwrap();
            assert!(events.is_empty());
        }

        assert_eq!(cart, before);
    }

    #[test]
    fn remove_on_empty_cart_is_a_noop() {
        let cart = Cart::empty(test_cart_id());
        let cmd = CartCommand::RemoveItem(RemoveItem {
            cart_id: cart.id_typed(),
            index: 0,
            occurred_at: test_time(),
        });
        assert!(cart.handle(&cmd).unwrap().is_empty());
    }

    #[test]
    fn removing_only_item_empties_the_cart() {
        let mut cart = Cart::empty(test_cart_id());
        add(&mut cart, tee(), Size::M, Color::Black);
        remove(&mut cart, 0);

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), 0);
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn remove_keeps_relative_order_of_remaining_lines() {
        let mut cart = Cart::empty(test_cart_id());
        add(&mut cart, tee(), Size::M, Color::Black);
        add(&mut cart, blazer(), Size::S, Color::White);
        add(&mut cart, tee(), Size::L, Color::Black);

        remove(&mut cart, 1);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].product_id, ProductId(1));
        assert_eq!(cart.lines()[0].size, Size::M);
        assert_eq!(cart.lines()[1].size, Size::L);
    }

    #[test]
    fn totals_on_empty_cart_are_zero() {
        let cart = Cart::empty(test_cart_id());
        assert_eq!(cart.total_price(), 0);
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn totals_multiply_unit_price_by_quantity() {
        let mut cart = Cart::empty(test_cart_id());
        add(&mut cart, tee(), Size::M, Color::Black);
        add(&mut cart, tee(), Size::M, Color::Black);
        add(&mut cart, tee(), Size::M, Color::Black);

        assert_eq!(cart.total_price(), 7500);
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn totals_sum_across_lines() {
        let mut cart = Cart::empty(test_cart_id());
        add(&mut cart, tee(), Size::M, Color::Black);
        add(&mut cart, blazer(), Size::S, Color::White);
        add(&mut cart, blazer(), Size::S, Color::White);

        assert_eq!(cart.total_price(), 2500 + 2 * 12_000);
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn version_increments_on_apply() {
        let mut cart = Cart::empty(test_cart_id());
        assert_eq!(cart.version(), 0);

        add(&mut cart, tee(), Size::M, Color::Black);
        assert_eq!(cart.version(), 1);

        add(&mut cart, tee(), Size::M, Color::Black);
        assert_eq!(cart.version(), 2);

        remove(&mut cart, 0);
        assert_eq!(cart.version(), 3);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut cart = Cart::empty(test_cart_id());
        add(&mut cart, tee(), Size::M, Color::Black);
        let snapshot = cart.clone();

        let cmd = CartCommand::AddItem(AddItem {
            cart_id: cart.id_typed(),
            product: tee(),
            size: Size::M,
            color: Color::Black,
            occurred_at: test_time(),
        });

        let events1 = cart.handle(&cmd).unwrap();
        let events2 = cart.handle(&cmd).unwrap();

        assert_eq!(cart, snapshot);
        assert_eq!(events1, events2);
    }

    #[test]
    fn restore_round_trips_lines_and_version() {
        let mut cart = Cart::empty(test_cart_id());
        add(&mut cart, tee(), Size::M, Color::Black);
        add(&mut cart, blazer(), Size::S, Color::White);

        let restored = Cart::restore(
            cart.id_typed(),
            cart.lines().to_vec(),
            cart.version(),
        );
        assert_eq!(restored, cart);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(usize, Size, Color),
            Remove(usize),
        }

        /// Products offering every size/color, so generated selections are
        /// always valid and sequences exercise dedup rather than rejection.
        fn full_range_products() -> Vec<Product> {
            vec![
                Product::new(
                    ProductId(1),
                    "Tee",
                    2500,
                    None,
                    "/img/tee.jpg",
                    Size::ALL.to_vec(),
                    Color::ALL.to_vec(),
                    "MINIMAL",
                    "T-Shirts",
                )
                .unwrap(),
                Product::new(
                    ProductId(2),
                    "Blazer",
                    12_000,
                    None,
                    "/img/blazer.jpg",
                    Size::ALL.to_vec(),
                    Color::ALL.to_vec(),
                    "ELEGANCE",
                    "Blazers",
                )
                .unwrap(),
            ]
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                (
                    0usize..2,
                    prop::sample::select(Size::ALL.to_vec()),
                    prop::sample::select(Color::ALL.to_vec()),
                )
                    .prop_map(|(product, size, color)| Op::Add(product, size, color)),
                (0usize..8).prop_map(Op::Remove),
            ]
        }

        fn run_ops(ops: &[Op]) -> Cart {
            let products = full_range_products();
            let mut cart = Cart::empty(CartId::new(AggregateId::new()));
            for op in ops {
                let cmd = match op {
                    Op::Add(product, size, color) => CartCommand::AddItem(AddItem {
                        cart_id: cart.id_typed(),
                        product: products[*product].clone(),
                        size: *size,
                        color: *color,
                        occurred_at: Utc::now(),
                    }),
                    Op::Remove(index) => CartCommand::RemoveItem(RemoveItem {
                        cart_id: cart.id_typed(),
                        index: *index,
                        occurred_at: Utc::now(),
                    }),
                };
                let events = cart.handle(&cmd).unwrap();
                for event in &events {
                    cart.apply(event);
                }
            }
            cart
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: no two lines ever share a (product, size, color) key.
            #[test]
            fn line_keys_stay_unique(ops in prop::collection::vec(op_strategy(), 0..24)) {
                let cart = run_ops(&ops);
                for (i, a) in cart.lines().iter().enumerate() {
                    for b in &cart.lines()[i + 1..] {
                        prop_assert_ne!(a.key(), b.key());
                    }
                }
            }

            /// Property: totals agree with a direct fold over the lines.
            #[test]
            fn totals_agree_with_line_fold(ops in prop::collection::vec(op_strategy(), 0..24)) {
                let cart = run_ops(&ops);
                let price: u64 = cart
                    .lines()
                    .iter()
                    .map(|l| l.unit_price * u64::from(l.quantity))
                    .sum();
                let count: u32 = cart.lines().iter().map(|l| l.quantity).sum();
                prop_assert_eq!(cart.total_price(), price);
                prop_assert_eq!(cart.total_item_count(), count);
            }

            /// Property: quantities stay positive; empty carts total zero.
            #[test]
            fn quantities_stay_positive(ops in prop::collection::vec(op_strategy(), 0..24)) {
                let cart = run_ops(&ops);
                for line in cart.lines() {
                    prop_assert!(line.quantity >= 1);
                }
                if cart.is_empty() {
                    prop_assert_eq!(cart.total_price(), 0);
                    prop_assert_eq!(cart.total_item_count(), 0);
                }
            }

            /// Property: replaying the same ops yields the same cart contents.
            #[test]
            fn op_replay_is_deterministic(ops in prop::collection::vec(op_strategy(), 0..24)) {
                let first = run_ops(&ops);
                let second = run_ops(&ops);
                prop_assert_eq!(first.lines(), second.lines());
                prop_assert_eq!(first.version(), second.version());
            }
        }
    }
}
