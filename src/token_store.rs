//! Token storage abstraction for ph8 clients.
//!
//! Holds the two opaque bearer tokens (access and refresh) under fixed,
//! well-known keys. Storage has no expiry tracking; an expired token is
//! only discovered by a failed authenticated call.
//!
//! Two backends are provided: an in-memory store for tests and ephemeral
//! sessions, and a TOML file store that survives process restarts the way
//! browser storage survives page reloads.

use crate::error::{Ph8LinkError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Well-known token slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    /// Short-lived access token
    Access,
    /// Long-lived refresh token
    Refresh,
}

impl TokenKey {
    /// Storage key name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// Trait for token storage backends.
///
/// Reads and writes are synchronous and atomic at single-operation
/// granularity; concurrent writers are not coordinated, last write wins.
/// Implementations must be shareable between the session controller and the
/// authenticated HTTP layer, hence `&self` methods with interior mutability.
pub trait TokenStore: Send + Sync {
    /// Retrieve a stored token, `Ok(None)` when the slot is empty
    fn get(&self, key: TokenKey) -> Result<Option<String>>;

    /// Store a token, overwriting any previous value in the slot
    fn set(&self, key: TokenKey, value: &str) -> Result<()>;

    /// Remove a stored token; succeeds even when the slot is empty
    fn remove(&self, key: TokenKey) -> Result<()>;

    /// Remove both tokens
    fn clear(&self) -> Result<()> {
        self.remove(TokenKey::Access)?;
        self.remove(TokenKey::Refresh)
    }

    /// Check whether a token is stored for the slot
    fn contains(&self, key: TokenKey) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// In-memory token store for tests and temporary sessions.
///
/// Does NOT persist tokens across restarts.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<&'static str, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: TokenKey) -> Result<Option<String>> {
        let tokens = self
            .tokens
            .lock()
            .map_err(|_| Ph8LinkError::StorageError("token store lock poisoned".into()))?;
        Ok(tokens.get(key.name()).cloned())
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<()> {
        let mut tokens = self
            .tokens
            .lock()
            .map_err(|_| Ph8LinkError::StorageError("token store lock poisoned".into()))?;
        tokens.insert(key.name(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: TokenKey) -> Result<()> {
        let mut tokens = self
            .tokens
            .lock()
            .map_err(|_| Ph8LinkError::StorageError("token store lock poisoned".into()))?;
        tokens.remove(key.name());
        Ok(())
    }
}

/// Serialized token file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TokenFile {
    #[serde(default)]
    tokens: HashMap<String, String>,
}

/// File-based token store.
///
/// Persists tokens to `<config_dir>/ph8/tokens.toml` with 0600 permissions
/// on Unix. The file holds only opaque bearer tokens, never passwords.
#[derive(Debug)]
pub struct FileTokenStore {
    file_path: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl FileTokenStore {
    /// Default token file path: `<config_dir>/ph8/tokens.toml`
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("ph8").join("tokens.toml")
        } else if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".config").join("ph8").join("tokens.toml")
        } else {
            PathBuf::from(".ph8").join("tokens.toml")
        }
    }

    /// Create a store at the default location
    pub fn new() -> Result<Self> {
        Self::with_path(Self::default_path())
    }

    /// Create a store at a custom location
    pub fn with_path(file_path: PathBuf) -> Result<Self> {
        let store = Self {
            file_path,
            cache: Mutex::new(HashMap::new()),
        };
        store.load_from_disk()?;
        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_disk(&self) -> Result<()> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| Ph8LinkError::StorageError("token store lock poisoned".into()))?;

        if !self.file_path.exists() {
            cache.clear();
            return Ok(());
        }

        let contents = fs::read_to_string(&self.file_path).map_err(|e| {
            Ph8LinkError::StorageError(format!(
                "cannot read token file '{}': {}",
                self.file_path.display(),
                e
            ))
        })?;

        let file: TokenFile = toml::from_str(&contents).map_err(|e| {
            Ph8LinkError::StorageError(format!(
                "corrupted token file '{}': {}",
                self.file_path.display(),
                e
            ))
        })?;

        *cache = file.tokens;
        Ok(())
    }

    fn save_to_disk(&self, cache: &HashMap<String, String>) -> Result<()> {
        let file = TokenFile {
            tokens: cache.clone(),
        };

        let contents = toml::to_string_pretty(&file)
            .map_err(|e| Ph8LinkError::StorageError(format!("failed to serialize tokens: {}", e)))?;

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Ph8LinkError::StorageError(format!(
                    "failed to create token directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        fs::write(&self.file_path, contents).map_err(|e| {
            Ph8LinkError::StorageError(format!(
                "failed to write token file '{}': {}",
                self.file_path.display(),
                e
            ))
        })?;

        // Owner read/write only, the file holds live credentials
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.file_path, permissions).map_err(|e| {
                Ph8LinkError::StorageError(format!(
                    "failed to set permissions on '{}': {}",
                    self.file_path.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: TokenKey) -> Result<Option<String>> {
        let cache = self
            .cache
            .lock()
            .map_err(|_| Ph8LinkError::StorageError("token store lock poisoned".into()))?;
        Ok(cache.get(key.name()).cloned())
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<()> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| Ph8LinkError::StorageError("token store lock poisoned".into()))?;
        cache.insert(key.name().to_string(), value.to_string());
        self.save_to_disk(&cache)
    }

    fn remove(&self, key: TokenKey) -> Result<()> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| Ph8LinkError::StorageError("token store lock poisoned".into()))?;
        cache.remove(key.name());
        self.save_to_disk(&cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_basic_operations() {
        let store = MemoryTokenStore::new();

        // Initially empty
        assert_eq!(store.get(TokenKey::Access).unwrap(), None);
        assert!(!store.contains(TokenKey::Access).unwrap());

        store.set(TokenKey::Access, "acc-1").unwrap();
        store.set(TokenKey::Refresh, "ref-1").unwrap();

        assert_eq!(store.get(TokenKey::Access).unwrap().as_deref(), Some("acc-1"));
        assert_eq!(store.get(TokenKey::Refresh).unwrap().as_deref(), Some("ref-1"));

        store.remove(TokenKey::Access).unwrap();
        assert_eq!(store.get(TokenKey::Access).unwrap(), None);
        // Refresh slot untouched
        assert!(store.contains(TokenKey::Refresh).unwrap());
    }

    #[test]
    fn test_memory_store_overwrite_last_write_wins() {
        let store = MemoryTokenStore::new();
        store.set(TokenKey::Access, "old").unwrap();
        store.set(TokenKey::Access, "new").unwrap();
        assert_eq!(store.get(TokenKey::Access).unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_clear_removes_both_tokens() {
        let store = MemoryTokenStore::new();
        store.set(TokenKey::Access, "a").unwrap();
        store.set(TokenKey::Refresh, "r").unwrap();

        store.clear().unwrap();

        assert_eq!(store.get(TokenKey::Access).unwrap(), None);
        assert_eq!(store.get(TokenKey::Refresh).unwrap(), None);
    }

    #[test]
    fn test_clear_on_empty_store_succeeds() {
        let store = MemoryTokenStore::new();
        store.clear().unwrap();
    }

    fn create_temp_store() -> (FileTokenStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tokens.toml");
        let store = FileTokenStore::with_path(file_path).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let (store, temp_dir) = create_temp_store();
        store.set(TokenKey::Access, "acc-persist").unwrap();
        store.set(TokenKey::Refresh, "ref-persist").unwrap();
        let path = store.path().to_path_buf();
        drop(store);

        // Reload from disk, simulating a page reload
        let reloaded = FileTokenStore::with_path(path).unwrap();
        assert_eq!(
            reloaded.get(TokenKey::Access).unwrap().as_deref(),
            Some("acc-persist")
        );
        assert_eq!(
            reloaded.get(TokenKey::Refresh).unwrap().as_deref(),
            Some("ref-persist")
        );

        drop(temp_dir);
    }

    #[test]
    fn test_file_store_remove_persists() {
        let (store, _temp_dir) = create_temp_store();
        store.set(TokenKey::Access, "a").unwrap();
        store.remove(TokenKey::Access).unwrap();

        let reloaded = FileTokenStore::with_path(store.path().to_path_buf()).unwrap();
        assert_eq!(reloaded.get(TokenKey::Access).unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_path(temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(store.get(TokenKey::Access).unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupted_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tokens.toml");
        fs::write(&path, "not [valid toml").unwrap();

        let result = FileTokenStore::with_path(path);
        assert!(matches!(result, Err(Ph8LinkError::StorageError(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (store, _temp_dir) = create_temp_store();
        store.set(TokenKey::Access, "secret").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_token_key_names() {
        assert_eq!(TokenKey::Access.name(), "access");
        assert_eq!(TokenKey::Refresh.name(), "refresh");
    }
}
