//! # formsmith-http
//!
//! The Axum HTTP service for the formsmith form builder. Owner routes
//! under `/api` authenticate with a bearer actor token; the share-link
//! contract is the public surface under `/f`: a token resolves to
//! exactly one form, and a submission is a flat element-id to value map.
//!
//! ## Modules
//!
//! - [`app`] - The [`App`] builder and the [`share_link`] helper
//! - [`routes`] - The route table and handlers
//! - [`extract`] - The bearer-token actor extractor
//! - [`error`] - JSON error responses

pub mod app;
pub mod error;
pub mod extract;
pub mod routes;

pub use app::{share_link, App, AppState};
pub use error::ApiError;
pub use extract::CurrentActor;
