#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Save-game storage contracts for Frostbite.
//!
//! The game controller only ever talks to a [`SaveRepository`]; the storage
//! medium behind it is the adapter's business. Adapters that persist saves as
//! text use the [`encode_save`]/[`decode_save`] codec.

use std::collections::BTreeMap;

use frostbite_core::GameState;
use tracing::debug;

mod transfer;

pub use transfer::{decode_save, encode_save, SaveTransferError, SAVE_HEADER};

/// Errors raised while storing a saved game.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Save names must be non-empty and use only ASCII letters, digits, `-` or `_`.
    #[error("'{0}' is not a valid save name")]
    InvalidName(String),
    /// The game state could not be encoded.
    #[error("could not encode save '{name}'")]
    Encode {
        /// Name of the save being written.
        name: String,
        /// Underlying codec failure.
        #[source]
        source: SaveTransferError,
    },
    /// The storage medium rejected the write.
    #[error("could not write save '{name}'")]
    Io {
        /// Name of the save being written.
        name: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Named storage for saved games.
///
/// Listing and loading never fail: unreadable storage looks empty and
/// missing or corrupt saves load as `None`.
pub trait SaveRepository {
    /// Names of every stored save in ascending order.
    fn list(&self) -> Vec<String>;

    /// Loads the save stored under `name`, if any.
    fn load(&self, name: &str) -> Option<GameState>;

    /// Stores `state` under `name`, replacing any previous save of that name.
    fn store(&mut self, name: &str, state: &GameState) -> Result<(), PersistenceError>;
}

/// Checks that a save name is usable as a storage key on every medium.
pub fn validate_save_name(name: &str) -> Result<(), PersistenceError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidName(name.to_owned()))
    }
}

/// Volatile repository that keeps saves in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySaveRepository {
    saves: BTreeMap<String, GameState>,
}

impl MemorySaveRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored saves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.saves.len()
    }

    /// Reports whether no saves are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.saves.is_empty()
    }
}

impl SaveRepository for MemorySaveRepository {
    fn list(&self) -> Vec<String> {
        self.saves.keys().cloned().collect()
    }

    fn load(&self, name: &str) -> Option<GameState> {
        self.saves.get(name).cloned()
    }

    fn store(&mut self, name: &str, state: &GameState) -> Result<(), PersistenceError> {
        validate_save_name(name)?;
        let replaced = self.saves.insert(name.to_owned(), state.clone()).is_some();
        debug!(name, replaced, "save stored in memory");
        Ok(())
    }
}
