//! # formsmith-store
//!
//! Storage for the formsmith form builder: the form and submission
//! records, the [`FormStore`] backend trait, and two backends — an
//! in-memory store for tests and a SQLite store for real deployments.
//!
//! ## Modules
//!
//! - [`records`] - [`FormRecord`], [`SubmissionRecord`], [`NewForm`]
//! - [`base`] - The [`FormStore`] trait
//! - [`memory`] - [`MemoryStore`]
//! - [`sqlite`] - [`SqliteStore`]

pub mod base;
pub mod memory;
pub mod records;
pub mod sqlite;

pub use base::FormStore;
pub use memory::MemoryStore;
pub use records::{FormRecord, NewForm, SubmissionRecord};
pub use sqlite::SqliteStore;
