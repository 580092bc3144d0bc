//! Actor resolution from tokens.
//!
//! [`SignedTokenProvider`] issues and resolves HMAC-signed actor tokens:
//! the token is the actor id followed by its signature, as produced by
//! the core [`Signer`]. Any token that does not verify resolves to
//! `ActorNotResolved`.

use async_trait::async_trait;

use formsmith_core::error::{FormsmithError, FormsmithResult};
use formsmith_core::signing::Signer;

use crate::actor::Actor;

/// The salt separating actor tokens from other signed values.
const ACTOR_TOKEN_SALT: &str = "formsmith.auth.actor_token";

/// Resolves a presented token to an [`Actor`].
///
/// A missing or invalid token is `ActorNotResolved`, never a different
/// error kind: callers map it straight to an unauthenticated response.
#[async_trait]
pub trait ActorProvider: Send + Sync {
    /// Resolves a token to the actor it identifies.
    ///
    /// # Errors
    ///
    /// Returns `ActorNotResolved` if the token is absent, malformed, or
    /// fails verification.
    async fn resolve(&self, token: &str) -> FormsmithResult<Actor>;
}

/// An [`ActorProvider`] backed by HMAC-SHA256 signed tokens.
pub struct SignedTokenProvider {
    signer: Signer,
}

impl SignedTokenProvider {
    /// Creates a provider signing with the given secret key.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            signer: Signer::new(secret_key).with_salt(ACTOR_TOKEN_SALT),
        }
    }

    /// Issues a token for an actor id.
    pub fn issue(&self, actor_id: &str) -> String {
        self.signer.sign(actor_id)
    }
}

#[async_trait]
impl ActorProvider for SignedTokenProvider {
    async fn resolve(&self, token: &str) -> FormsmithResult<Actor> {
        if token.is_empty() {
            return Err(FormsmithError::ActorNotResolved(
                "no actor token presented".to_string(),
            ));
        }
        let actor_id = self.signer.unsign(token).map_err(|_| {
            FormsmithError::ActorNotResolved("actor token failed verification".to_string())
        })?;
        if actor_id.is_empty() {
            return Err(FormsmithError::ActorNotResolved(
                "actor token carries no actor id".to_string(),
            ));
        }
        Ok(Actor::new(actor_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issue_resolve_roundtrip() {
        let provider = SignedTokenProvider::new("secret");
        let token = provider.issue("owner-42");
        let actor = provider.resolve(&token).await.unwrap();
        assert_eq!(actor.id, "owner-42");
    }

    #[tokio::test]
    async fn test_tampered_token_is_rejected() {
        let provider = SignedTokenProvider::new("secret");
        let token = provider.issue("owner-42").replacen("owner-42", "owner-43", 1);
        let result = provider.resolve(&token).await;
        assert!(matches!(result, Err(FormsmithError::ActorNotResolved(_))));
    }

    #[tokio::test]
    async fn test_wrong_key_is_rejected() {
        let issuer = SignedTokenProvider::new("secret");
        let verifier = SignedTokenProvider::new("different-secret");
        let token = issuer.issue("owner-42");
        assert!(verifier.resolve(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let provider = SignedTokenProvider::new("secret");
        let result = provider.resolve("").await;
        assert!(matches!(result, Err(FormsmithError::ActorNotResolved(_))));
    }

    #[tokio::test]
    async fn test_actor_token_salt_differs_from_plain_signer() {
        let provider = SignedTokenProvider::new("secret");
        let plain = Signer::new("secret").sign("owner-42");
        assert!(provider.resolve(&plain).await.is_err());
    }
}
