use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use vitrine_core::SessionId;

use super::{SessionSnapshot, SessionStore, SessionStoreError};

/// File-backed session store: one pretty-printed JSON document per session.
///
/// The directory is created on first save. Concurrent writers are not a
/// concern here — one process owns a session at a time.
#[derive(Debug, Clone)]
pub struct JsonFileSessionStore {
    dir: PathBuf,
}

impl JsonFileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, session_id: SessionId) -> PathBuf {
        self.dir.join(format!("{session_id}.json"))
    }
}

impl SessionStore for JsonFileSessionStore {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.snapshot_path(snapshot.session_id);
        let body = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&path, body)?;
        debug!(session_id = %snapshot.session_id, path = %path.display(), "session snapshot saved");
        Ok(())
    }

    fn load(&self, session_id: SessionId) -> Result<Option<SessionSnapshot>, SessionStoreError> {
        let path = self.snapshot_path(session_id);
        let body = match fs::read(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_slice(&body)?;
        debug!(%session_id, path = %path.display(), "session snapshot loaded");
        Ok(Some(snapshot))
    }

    fn clear(&self, session_id: SessionId) -> Result<(), SessionStoreError> {
        match fs::remove_file(self.snapshot_path(session_id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::sample_snapshot;
    use super::*;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!(
                "vitrine-session-store-{}",
                uuid::Uuid::now_v7()
            ));
            Self(dir)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn save_then_load_round_trips_through_disk() {
        let dir = TempDir::new();
        let store = JsonFileSessionStore::new(&dir.0);
        let snapshot = sample_snapshot(SessionId::new());

        store.save(&snapshot).unwrap();
        let loaded = store.load(snapshot.session_id).unwrap();
        assert_eq!(loaded, Some(snapshot));
    }

    #[test]
    fn load_without_a_file_is_none() {
        let dir = TempDir::new();
        let store = JsonFileSessionStore::new(&dir.0);
        assert_eq!(store.load(SessionId::new()).unwrap(), None);
    }

    #[test]
    fn clear_deletes_the_file_and_tolerates_absence() {
        let dir = TempDir::new();
        let store = JsonFileSessionStore::new(&dir.0);
        let snapshot = sample_snapshot(SessionId::new());

        store.save(&snapshot).unwrap();
        store.clear(snapshot.session_id).unwrap();
        assert_eq!(store.load(snapshot.session_id).unwrap(), None);
        store.clear(snapshot.session_id).unwrap();
    }

    #[test]
    fn corrupt_file_surfaces_a_serialization_error() {
        let dir = TempDir::new();
        let store = JsonFileSessionStore::new(&dir.0);
        let session_id = SessionId::new();

        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.dir().join(format!("{session_id}.json")), b"not json").unwrap();

        let err = store.load(session_id).unwrap_err();
        assert!(matches!(err, SessionStoreError::Serialization(_)));
    }
}
