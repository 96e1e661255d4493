use crate::{Result, Session};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage for the current session.
///
/// Implementations are shared process-wide behind an `Arc`; the API layer's
/// session client is the only writer.
pub trait SessionStore: Send + Sync {
    /// Read the current session, if any.
    fn load(&self) -> Result<Option<Session>>;

    /// Replace the current session.
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove the current session. Returns `true` if one was present.
    fn clear(&self) -> Result<bool>;
}

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    current: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a session.
    pub fn with_session(session: Session) -> Self {
        Self {
            current: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self
            .current
            .read()
            .expect("RwLock poisoned: another thread panicked while holding the lock")
            .clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self
            .current
            .write()
            .expect("RwLock poisoned: another thread panicked while holding the lock") =
            Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        Ok(self
            .current
            .write()
            .expect("RwLock poisoned: another thread panicked while holding the lock")
            .take()
            .is_some())
    }
}

/// Session store backed by a JSON file, so a login survives between runs.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_private(&self, contents: &[u8]) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        file.write_all(contents)?;
        file.sync_all()
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_vec_pretty(session)?;
        self.write_private(&json)?;
        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Session file {} removed", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AuthError;
    use tempfile::TempDir;

    fn session(token: &str) -> Session {
        Session::new(token, "u-1", "operator", "op@example.com", Vec::new())
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());
        assert!(!store.clear().unwrap());

        store.save(&session("t1")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().token(), "t1");

        store.save(&session("t2")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().token(), "t2");

        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_with_session() {
        let store = MemorySessionStore::with_session(session("seeded"));
        assert_eq!(store.load().unwrap().unwrap().token(), "seeded");
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("nested").join("session.json");

        let store = FileSessionStore::new(&path);
        assert!(store.load().unwrap().is_none());
        store.save(&session("persisted")).unwrap();

        let reopened = FileSessionStore::new(&path);
        let loaded = reopened.load().unwrap().expect("session on disk");
        assert_eq!(loaded.token(), "persisted");
        assert_eq!(loaded.user_id(), "u-1");

        assert!(reopened.clear().unwrap());
        assert!(!path.exists());
        assert!(!reopened.clear().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("session.json");
        FileSessionStore::new(&path).save(&session("t")).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_file_store_corrupt_contents() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileSessionStore::new(&path).load().unwrap_err();
        assert!(matches!(err, AuthError::Corrupt(_)));
    }
}
