//! Session snapshot persistence.
//!
//! The storefront core is session-scoped and in-memory; persistence is an
//! external collaborator behind a save/load interface. A snapshot carries
//! the cart lines and the active filter criteria — enough to reopen a
//! session where it left off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vitrine_cart::{CartId, LineItem};
use vitrine_catalog::FilterCriteria;
use vitrine_core::SessionId;

mod in_memory;
mod json_file;

pub use in_memory::InMemorySessionStore;
pub use json_file::JsonFileSessionStore;

/// Serializable image of one storefront session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub cart_id: CartId,
    pub cart_version: u64,
    pub lines: Vec<LineItem>,
    pub criteria: FilterCriteria,
    pub saved_at: DateTime<Utc>,
}

/// Session store operation error.
///
/// These are **infrastructure errors** (IO, encoding, availability), kept
/// apart from domain errors on purpose.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Save/load interface for session snapshots.
pub trait SessionStore {
    /// Persist a snapshot, replacing any previous one for the same session.
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError>;

    /// Load the snapshot for a session. `Ok(None)` when none was saved.
    fn load(&self, session_id: SessionId) -> Result<Option<SessionSnapshot>, SessionStoreError>;

    /// Drop the snapshot for a session. Unknown sessions are a no-op.
    fn clear(&self, session_id: SessionId) -> Result<(), SessionStoreError>;
}

#[cfg(test)]
pub(crate) fn sample_snapshot(session_id: SessionId) -> SessionSnapshot {
    use vitrine_catalog::{Color, ProductId, Size};
    use vitrine_core::AggregateId;

    SessionSnapshot {
        session_id,
        cart_id: CartId::new(AggregateId::new()),
        cart_version: 2,
        lines: vec![LineItem {
            product_id: ProductId(1),
            product_name: "Classic Black T-Shirt".to_string(),
            unit_price: 2500,
            size: Size::M,
            color: Color::Black,
            quantity: 2,
        }],
        criteria: FilterCriteria {
            brand: Some("MINIMAL".to_string()),
            ..FilterCriteria::default()
        },
        saved_at: Utc::now(),
    }
}
