//! # formsmith
//!
//! A drag-and-drop form builder engine and collection service for Rust.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. You can depend on `formsmith` to get the whole pipeline, or
//! depend on individual crates for finer-grained control.

/// Core types: errors, settings, logging, signing, and id generation.
pub use formsmith_core as core;

/// The field registry: element types, validation, and rendering.
#[cfg(feature = "fields")]
pub use formsmith_fields as fields;

/// Designer state and the drag-and-drop reducer.
#[cfg(feature = "designer")]
pub use formsmith_designer as designer;

/// Form and submission storage: records, `FormStore`, and backends.
#[cfg(feature = "store")]
pub use formsmith_store as store;

/// Actor identity and signed-token resolution.
#[cfg(feature = "auth")]
pub use formsmith_auth as auth;

/// Persistence actions: owner-scoped and public operations.
#[cfg(feature = "actions")]
pub use formsmith_actions as actions;

/// The Axum HTTP service and the public share-link surface.
#[cfg(feature = "http")]
pub use formsmith_http as http;
