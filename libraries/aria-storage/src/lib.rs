//! Aria Player Storage
//!
//! Read-only song catalog plus the persisted favourites and playlists
//! collections for Aria Player.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each collection owns its own load/persist logic
//! - **Full Overwrite**: every mutation rewrites the whole collection under its key
//! - **Fail-Open Loading**: malformed persisted data is logged and treated as empty
//! - **Pluggable Backends**: in-memory, JSON files, or browser `localStorage`
//!
//! # Example
//!
//! ```rust
//! use aria_core::{PlaybackContext, PlaybackLibrary};
//! use aria_storage::{Catalog, Library, MemoryStore};
//! use std::sync::Arc;
//!
//! let library = Library::open(Catalog::bundled().unwrap(), Arc::new(MemoryStore::new()));
//!
//! let first = library.catalog().list_all()[0].clone();
//! library.favourites_mut().add(first.clone()).unwrap();
//!
//! let favourites = library.resolve(&PlaybackContext::Favourites);
//! assert_eq!(favourites, vec![first]);
//! ```

mod context;
mod error;

pub mod backend;

// Vertical slices
pub mod catalog;
pub mod favourites;
pub mod playlists;

pub use backend::{FileStore, MemoryStore};
#[cfg(feature = "web")]
pub use backend::LocalStore;
pub use catalog::{Catalog, SearchResults};
pub use context::Library;
pub use error::StorageError;
pub use favourites::FavouritesStore;
pub use playlists::PlaylistsStore;
