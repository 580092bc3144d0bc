//! # formsmith-auth
//!
//! Actor identity for the formsmith form builder: the [`Actor`] model
//! and token-based actor resolution. Owner-scoped operations take a
//! resolved actor and filter storage queries on its id; there is no
//! separate authorization layer.
//!
//! ## Modules
//!
//! - [`actor`] - The [`Actor`] identity
//! - [`provider`] - [`ActorProvider`] and the signed-token implementation

pub mod actor;
pub mod provider;

pub use actor::Actor;
pub use provider::{ActorProvider, SignedTokenProvider};
