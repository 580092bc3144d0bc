//! The actor model.
//!
//! An [`Actor`] is the authenticated owner identity that every
//! owner-scoped operation filters on. Identity resolution is delegated
//! to an [`ActorProvider`](crate::provider::ActorProvider); the actor
//! itself is just the resolved id plus a display name.

use serde::{Deserialize, Serialize};

/// An authenticated owner identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's stable id. Form ownership is keyed on it.
    pub id: String,
    /// A human-readable name for display.
    pub display_name: String,
}

impl Actor {
    /// Creates an actor whose display name is its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }
}
