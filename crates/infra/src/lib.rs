//! Infrastructure adapters.
//!
//! Everything here sits outside the domain core: the core never depends on
//! this crate. Currently that is session snapshot persistence.

pub mod session_store;
