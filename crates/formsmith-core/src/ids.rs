//! Id and token generation.
//!
//! Canvas elements get short opaque hex ids; published forms get UUID v4
//! share tokens. Element ids only need to be unique within a single form,
//! share tokens must be unique across the whole store.

use rand::RngCore;
use std::fmt::Write;

/// Generates an opaque id for a canvas element.
///
/// Eight hex characters: unique enough within one form, short enough to
/// read in logs and stored content.
///
/// # Examples
///
/// ```
/// let id = formsmith_core::ids::element_id();
/// assert_eq!(id.len(), 8);
/// assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn element_id() -> String {
    let mut bytes = [0u8; 4];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().fold(String::with_capacity(8), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    })
}

/// Generates a share token for a form's public link.
pub fn share_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
