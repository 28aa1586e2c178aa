//! Cart persistence

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::cart::Cart;

/// Errors raised by a cart repository.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Persisted content that does not deserialize as a cart.
    #[error("malformed persisted cart: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Contract consumed by the cart store.
///
/// Reads may fail; the store recovers by substituting an empty cart.
/// Writes are best-effort and their failures are never surfaced past the
/// store.
pub trait CartRepository {
    /// Load the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the persisted content cannot be read
    /// or parsed. Absence of prior state is not an error.
    fn load(&self) -> Result<Cart, StorageError>;

    /// Persist the full cart, replacing any previous state.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the content cannot be written.
    fn save(&self, cart: &Cart) -> Result<(), StorageError>;
}

/// File-backed repository holding one serialized JSON array of entries
/// under a single well-known path, the local-storage-key equivalent.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a repository reading and writing the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartRepository for JsonFileStore {
    fn load(&self) -> Result<Cart, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            // No prior state: a first visit starts with an empty cart.
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(Cart::default());
            }
            Err(error) => return Err(error.into()),
        };

        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_string(cart)?)?;

        Ok(())
    }
}
