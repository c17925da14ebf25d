//! Shopping cart domain module.
//!
//! This crate contains the cart ledger: an ordered list of line items with
//! add/remove/aggregate operations, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod cart;

pub use cart::{
    AddItem, Cart, CartCommand, CartEvent, CartId, ItemAdded, ItemQuantityIncreased,
    ItemRemoved, LineItem, RemoveItem,
};
