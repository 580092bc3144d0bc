//! Cryptographic signing for actor tokens.
//!
//! Provides [`Signer`], which signs and verifies strings using HMAC-SHA256.
//! The auth layer builds actor tokens on top of this: the token is the
//! actor id followed by its signature.
//!
//! Verification supports `fallback_keys` for key rotation: the primary key
//! is tried first, then each fallback key in order.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::FormsmithError;

type HmacSha256 = Hmac<Sha256>;

/// The separator used between value and signature.
const DEFAULT_SEP: &str = ":";

/// Signs and verifies strings using HMAC-SHA256.
///
/// # Examples
///
/// ```
/// use formsmith_core::signing::Signer;
///
/// let signer = Signer::new("my-secret-key");
/// let signed = signer.sign("hello");
/// assert_eq!(signer.unsign(&signed).unwrap(), "hello");
/// ```
pub struct Signer {
    key: String,
    fallback_keys: Vec<String>,
    sep: String,
    salt: String,
}

impl Signer {
    /// Creates a new `Signer` with the given secret key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fallback_keys: Vec::new(),
            sep: DEFAULT_SEP.to_string(),
            salt: "formsmith.core.signing.Signer".to_string(),
        }
    }

    /// Sets fallback keys for key rotation.
    #[must_use]
    pub fn with_fallback_keys(mut self, keys: Vec<String>) -> Self {
        self.fallback_keys = keys;
        self
    }

    /// Sets the separator character between value and signature.
    #[must_use]
    pub fn with_sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    /// Sets the salt for the HMAC.
    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    /// Computes the HMAC-SHA256 signature for a value using the given key.
    fn make_signature(&self, value: &str, key: &str) -> String {
        let salted_key = format!("{}:{}", self.salt, key);
        let mut mac =
            HmacSha256::new_from_slice(salted_key.as_bytes()).expect("HMAC accepts any key size");
        mac.update(value.as_bytes());
        let result = mac.finalize().into_bytes();
        URL_SAFE_NO_PAD.encode(result)
    }

    /// Signs a value, returning `"value:signature"`.
    pub fn sign(&self, value: &str) -> String {
        let sig = self.make_signature(value, &self.key);
        format!("{}{}{}", value, self.sep, sig)
    }

    /// Verifies and returns the original value from a signed string.
    ///
    /// Tries the primary key first, then each fallback key.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is invalid or the format is wrong.
    pub fn unsign(&self, signed_value: &str) -> Result<String, FormsmithError> {
        let (value, sig) = signed_value.rsplit_once(&self.sep).ok_or_else(|| {
            FormsmithError::BadRequest("No separator found in signed value".to_string())
        })?;

        // Try primary key
        let expected = self.make_signature(value, &self.key);
        if constant_time_eq(sig, &expected) {
            return Ok(value.to_string());
        }

        // Try fallback keys
        for fallback in &self.fallback_keys {
            let expected = self.make_signature(value, fallback);
            if constant_time_eq(sig, &expected) {
                return Ok(value.to_string());
            }
        }

        Err(FormsmithError::BadRequest(
            "Signature verification failed".to_string(),
        ))
    }
}

/// Compares two strings in constant time to avoid timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_unsign_roundtrip() {
        let signer = Signer::new("secret");
        let signed = signer.sign("owner-42");
        assert_eq!(signer.unsign(&signed).unwrap(), "owner-42");
    }

    #[test]
    fn test_unsign_tampered_value() {
        let signer = Signer::new("secret");
        let signed = signer.sign("owner-42");
        let tampered = signed.replacen("owner-42", "owner-43", 1);
        assert!(signer.unsign(&tampered).is_err());
    }

    #[test]
    fn test_unsign_wrong_key() {
        let signer = Signer::new("secret");
        let other = Signer::new("different-secret");
        let signed = signer.sign("owner-42");
        assert!(other.unsign(&signed).is_err());
    }

    #[test]
    fn test_unsign_no_separator() {
        let signer = Signer::new("secret").with_sep("!");
        assert!(signer.unsign("no-separator-here").is_err());
    }

    #[test]
    fn test_fallback_keys() {
        let old = Signer::new("old-key");
        let signed = old.sign("owner-42");

        let rotated = Signer::new("new-key").with_fallback_keys(vec!["old-key".to_string()]);
        assert_eq!(rotated.unsign(&signed).unwrap(), "owner-42");
    }

    #[test]
    fn test_different_salts_produce_different_signatures() {
        let a = Signer::new("secret").with_salt("salt-a");
        let b = Signer::new("secret").with_salt("salt-b");
        assert_ne!(a.sign("value"), b.sign("value"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
    }
}
