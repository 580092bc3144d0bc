//! Error responses.
//!
//! Every handler error is serialized as `{"error": ...}` with the status
//! the core error maps to.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use formsmith_core::error::FormsmithError;

/// A handler error carrying a [`FormsmithError`].
#[derive(Debug)]
pub struct ApiError(pub FormsmithError);

impl From<FormsmithError> for ApiError {
    fn from(err: FormsmithError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ApiError(FormsmithError::NotFound("form 7".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            ApiError(FormsmithError::ActorNotResolved("no token".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiError(FormsmithError::DatabaseError("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
