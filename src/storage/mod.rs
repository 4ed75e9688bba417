//! # Layout Storage
//!
//! Persistent key-value slots holding serialized layout documents.
//!
//! ## Available Stores
//!
//! - [`file`]: one JSON file per key under a directory
//! - [`memory`]: in-process map, for tests and throwaway sessions
//!
//! A missing key is a normal outcome (`Ok(None)`), not an error.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// A key-value slot store. Values are overwritten and read wholesale.
pub trait LayoutStore {
    /// Read the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn save(&mut self, key: &str, contents: &str) -> Result<()>;
}
