//! Key-value persistence trait
//!
//! The favourites and playlists stores persist whole collections as JSON
//! strings under fixed keys. Backends only need string get/set semantics,
//! which maps directly onto browser `localStorage` and onto a directory of
//! JSON files on native targets.

use crate::error::Result;

/// Key holding the JSON array of favourite songs
pub const FAVOURITES_KEY: &str = "favourites";

/// Key holding the JSON array of playlists
pub const PLAYLISTS_KEY: &str = "playlists";

/// Durable string key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
