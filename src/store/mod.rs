//! # Storage Layer
//!
//! Persistence is abstracted behind the [`StorageBackend`] trait: a plain
//! key-value store of strings, which is all the record and preference
//! stores ever need. Backends only move strings around; serialization and
//! fallback behavior live in the stores above them.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: production backend, one file per key under a data
//!   directory
//! - [`memory::MemBackend`]: in-memory backend for tests, with error
//!   simulation hooks
//!
//! ## Keys
//!
//! The key names are fixed and carry their historical prefix so data
//! written by earlier versions of the application keeps loading.
//!
//! ## Failure policy
//!
//! Backends report failures honestly through [`Result`]. The stores built
//! on top treat those failures as non-fatal: reads fall back to defaults
//! or seed data, writes are logged and swallowed, and the in-memory state
//! stays authoritative for the session.

use crate::error::Result;

pub mod employee_store;
pub mod fs;
pub mod memory;

/// Storage key for the serialized employee collection (JSON array).
pub const EMPLOYEES_KEY: &str = "employeeManagement_employees";
/// Storage key for the list view mode (raw string).
pub const VIEW_MODE_KEY: &str = "employeeManagement_viewMode";
/// Storage key for the items-per-page setting (raw string).
pub const ITEMS_PER_PAGE_KEY: &str = "employeeManagement_itemsPerPage";
/// Storage key for the UI language (raw string).
pub const LANGUAGE_KEY: &str = "employeeManagement_language";

/// Abstract interface for key-value persistence.
///
/// Methods take `&self`; implementations handle interior mutability (or
/// are stateless I/O), which keeps the trait usable from stores that only
/// hold a shared reference during reads.
pub trait StorageBackend {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

// A borrowed backend is itself a backend, so the record store and the
// preference store can share one underlying store the way they shared a
// single browser storage originally.
impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
