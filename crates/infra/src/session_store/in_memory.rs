use std::collections::HashMap;
use std::sync::RwLock;

use vitrine_core::SessionId;

use super::{SessionSnapshot, SessionStore, SessionStoreError};

/// In-memory session store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    snapshots: RwLock<HashMap<SessionId, SessionSnapshot>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| SessionStoreError::Unavailable("lock poisoned".to_string()))?;
        snapshots.insert(snapshot.session_id, snapshot.clone());
        Ok(())
    }

    fn load(&self, session_id: SessionId) -> Result<Option<SessionSnapshot>, SessionStoreError> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| SessionStoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(snapshots.get(&session_id).cloned())
    }

    fn clear(&self, session_id: SessionId) -> Result<(), SessionStoreError> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| SessionStoreError::Unavailable("lock poisoned".to_string()))?;
        snapshots.remove(&session_id);
        Ok(())
    }
}
