//! # Roster Architecture
//!
//! Roster is a **UI-agnostic employee records library**. It owns the data,
//! the rules and the arithmetic; whatever renders the list (a web view, a
//! TUI, a test harness) stays outside and talks to it through plain Rust
//! types.
//!
//! ## The Pieces
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI layer (external)                                        │
//! │  - Renders lists/forms, wires user events, translates the   │
//! │    error classification keys into display strings           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  EmployeeStore (store/employee_store.rs)                    │
//! │  - Authoritative in-memory collection, CRUD + search        │
//! │  - Validates before mutating, notifies subscribers after    │
//! └──────────────┬──────────────────────────┬───────────────────┘
//!                │                          │
//!                ▼                          ▼
//! ┌──────────────────────────┐  ┌───────────────────────────────┐
//! │  validation / pagination │  │  StorageBackend (store/)      │
//! │  - pure functions, no    │  │  - key-value strings          │
//! │    storage or UI access  │  │  - FsBackend, MemBackend      │
//! └──────────────────────────┘  └───────────────────────────────┘
//! ```
//!
//! The [`prefs::PreferenceStore`] sits beside the employee store over the
//! same backend and persists the three scalar UI settings.
//!
//! ## Key Principles
//!
//! - **Validation failures are data, not errors thrown at the caller**:
//!   `add`/`update` hand back a map of field → classification key that a
//!   form can render next to its inputs.
//! - **Storage is fail-soft**: a broken backend read falls back to seed
//!   data or defaults, a broken write is logged and the in-memory state
//!   stays authoritative. The session keeps working.
//! - **Single-threaded by design**: one logical thread drives the stores,
//!   so operations are strictly serialized and no locking exists anywhere.
//!
//! ## Module Overview
//!
//! - [`model`]: core data types (`Employee`, `Department`, `Position`)
//! - [`validation`]: field rules and error classifications
//! - [`pagination`]: page slicing and the visible page-number window
//! - [`prefs`]: persisted view-mode/items-per-page/language settings
//! - [`store`]: the storage trait, its backends and the employee store
//! - [`dates`]: calendar helpers shared by validation
//! - [`error`]: error types

pub mod dates;
pub mod error;
pub mod model;
pub mod pagination;
pub mod prefs;
pub mod store;
pub mod validation;

pub use error::{Result, RosterError};
pub use model::{Department, Employee, EmployeeInput, Position};
pub use pagination::{paginate, PageView};
pub use prefs::{Language, PreferenceStore, ViewMode};
pub use store::employee_store::{EmployeeStore, ListenerId};
pub use store::StorageBackend;
pub use validation::{Field, ValidationError, ValidationErrors};
