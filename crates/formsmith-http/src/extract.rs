//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use formsmith_auth::Actor;
use formsmith_core::error::FormsmithError;

use crate::app::AppState;
use crate::error::ApiError;

/// Extracts the authenticated actor from `Authorization: Bearer <token>`.
///
/// A missing header, a non-bearer scheme, or a token the provider
/// rejects all surface as a 401.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError(FormsmithError::ActorNotResolved(
                    "no bearer token presented".to_string(),
                ))
            })?;
        let actor = state.provider.resolve(token).await?;
        Ok(Self(actor))
    }
}
