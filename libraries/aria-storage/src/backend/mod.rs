//! Key-value backends for persisted collections

mod file;
#[cfg(feature = "web")]
mod local;
mod memory;

pub use file::FileStore;
#[cfg(feature = "web")]
pub use local::LocalStore;
pub use memory::MemoryStore;
