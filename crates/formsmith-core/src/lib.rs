//! # formsmith-core
//!
//! Core types for the formsmith form builder. This crate has no
//! intra-workspace dependencies and provides the foundation for all other
//! crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Service settings and global configuration
//! - [`logging`] - Tracing-based logging integration
//! - [`signing`] - HMAC signing for actor tokens
//! - [`ids`] - Element id and share token generation

pub mod error;
pub mod ids;
pub mod logging;
pub mod settings;
pub mod signing;

// Re-export the most commonly used types at the crate root.
pub use error::{FormsmithError, FormsmithResult, ValidationError};
pub use settings::{Settings, SETTINGS};
