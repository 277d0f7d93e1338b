//! Client-local persistent storage for the session entries

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Key of the bearer token entry
pub const TOKEN_KEY: &str = "authToken";
/// Key of the serialized user snapshot entry
pub const USER_KEY: &str = "currentUser";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO operation failed on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt session file {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Backend(String),
}

/// String key-value store that survives process restarts.
///
/// Implementations must be safe to share across tasks. `set_all` and
/// `remove_all` should apply every entry in a single write where the backend
/// allows it; the defaults fall back to one call per entry.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove an entry; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
