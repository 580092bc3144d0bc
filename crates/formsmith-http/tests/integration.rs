//! Integration tests for the formsmith HTTP surface.
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`:
//! authentication, the owner form lifecycle, the public share-link
//! contract, and the error shapes.

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use formsmith_auth::SignedTokenProvider;
use formsmith_core::settings::Settings;
use formsmith_fields::element::{ElementKind, ElementType};
use formsmith_fields::registry::construct;
use formsmith_http::App;

/// Builds a router over a fresh in-memory store, plus a valid actor
/// token for "owner-1".
fn test_app() -> (Router, String) {
    let settings = Settings {
        secret_key: "test-secret".to_string(),
        ..Settings::default()
    };
    let token = SignedTokenProvider::new("test-secret").issue("owner-1");
    (App::new(settings).into_router(), token)
}

fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value).expect("body serializes"))
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request builds")
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(req).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, value)
}

/// Creates a form named "Survey 2026" and returns its id.
async fn create_form(router: &Router, token: &str) -> i64 {
    let (status, body) = send(
        router,
        request(
            "POST",
            "/api/forms",
            Some(token),
            Some(serde_json::json!({ "name": "Survey 2026", "description": "Annual" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("id is an integer")
}

/// Saves a required text field plus an optional number field.
async fn save_content(router: &Router, token: &str, id: i64) {
    let mut name = construct(ElementType::TextField, "name");
    if let ElementKind::TextField(attrs) = &mut name.kind {
        attrs.required = true;
    }
    let elements = vec![name, construct(ElementType::NumberField, "age")];
    let (status, _) = send(
        router,
        request(
            "PUT",
            &format!("/api/forms/{id}/content"),
            Some(token),
            Some(serde_json::to_value(&elements).expect("elements serialize")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// Publishes the form and returns its share token.
async fn publish(router: &Router, token: &str, id: i64) -> String {
    let (status, body) = send(
        router,
        request(
            "POST",
            &format!("/api/forms/{id}/publish"),
            Some(token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["shareLink"].as_str().expect("share link").contains("/f/"));
    body["form"]["shareUrl"]
        .as_str()
        .expect("share url")
        .to_string()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_owner_routes_require_bearer_token() {
    let (router, _) = test_app();
    let (status, body) = send(&router, request("GET", "/api/forms", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let (router, _) = test_app();
    let (status, _) = send(
        &router,
        request("GET", "/api/forms", Some("owner-1:forged"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let (router, _) = test_app();
    let forged = SignedTokenProvider::new("other-secret").issue("owner-1");
    let (status, _) = send(&router, request("GET", "/api/forms", Some(&forged), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Owner form lifecycle
// ============================================================================

#[tokio::test]
async fn test_create_form_validates_name() {
    let (router, token) = test_app();
    let (status, body) = send(
        &router,
        request(
            "POST",
            "/api/forms",
            Some(&token),
            Some(serde_json::json!({ "name": "abc" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_list_and_fetch() {
    let (router, token) = test_app();
    let id = create_form(&router, &token).await;

    let (status, body) = send(&router, request("GET", "/api/forms", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("list").len(), 1);

    let (status, body) = send(
        &router,
        request("GET", &format!("/api/forms/{id}"), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Survey 2026");
    assert_eq!(body["content"], "[]");
    assert_eq!(body["published"], false);
}

#[tokio::test]
async fn test_foreign_owner_cannot_see_form() {
    let (router, token) = test_app();
    let id = create_form(&router, &token).await;

    let stranger = SignedTokenProvider::new("test-secret").issue("owner-2");
    let (status, _) = send(
        &router,
        request("GET", &format!("/api/forms/{id}"), Some(&stranger), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_form_is_not_found() {
    let (router, token) = test_app();
    let (status, _) = send(
        &router,
        request("GET", "/api/forms/999", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// The public share-link contract
// ============================================================================

#[tokio::test]
async fn test_share_url_resolves_to_exactly_one_form() {
    let (router, token) = test_app();
    let id = create_form(&router, &token).await;
    save_content(&router, &token, id).await;
    let share_url = publish(&router, &token, id).await;

    let (status, body) = send(&router, request("GET", &format!("/f/{share_url}"), None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_i64(), Some(id));
}

#[tokio::test]
async fn test_content_fetch_counts_visits() {
    let (router, token) = test_app();
    let id = create_form(&router, &token).await;
    save_content(&router, &token, id).await;
    let share_url = publish(&router, &token, id).await;

    for _ in 0..2 {
        let (status, body) = send(
            &router,
            request("GET", &format!("/f/{share_url}/content"), None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().expect("elements").len(), 2);
    }

    let (_, body) = send(
        &router,
        request("GET", &format!("/api/forms/{id}"), Some(&token), None),
    )
    .await;
    assert_eq!(body["visits"].as_i64(), Some(2));
}

#[tokio::test]
async fn test_submit_roundtrip_and_table() {
    let (router, token) = test_app();
    let id = create_form(&router, &token).await;
    save_content(&router, &token, id).await;
    let share_url = publish(&router, &token, id).await;

    let mut values = HashMap::new();
    values.insert("name", "Jane");
    values.insert("age", "30");
    let (status, body) = send(
        &router,
        request(
            "POST",
            &format!("/f/{share_url}"),
            None,
            Some(serde_json::json!(values)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["formId"].as_i64(), Some(id));

    let (status, body) = send(
        &router,
        request(
            "GET",
            &format!("/api/forms/{id}/submissions"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["form"]["submissions"].as_i64(), Some(1));
    let columns = body["table"]["columns"].as_array().expect("columns");
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0]["id"], "name");
    assert_eq!(columns[0]["required"], true);
    let rows = body["table"]["rows"].as_array().expect("rows");
    assert_eq!(rows[0]["values"]["name"], "Jane");
    assert!(rows[0]["submittedAt"].is_string());
}

#[tokio::test]
async fn test_submit_missing_required_value_is_rejected() {
    let (router, token) = test_app();
    let id = create_form(&router, &token).await;
    save_content(&router, &token, id).await;
    let share_url = publish(&router, &token, id).await;

    let (status, body) = send(
        &router,
        request(
            "POST",
            &format!("/f/{share_url}"),
            None,
            Some(serde_json::json!({ "age": "30" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error").contains("name"));
}

#[tokio::test]
async fn test_submit_against_unpublished_form_is_rejected() {
    let (router, token) = test_app();
    let id = create_form(&router, &token).await;
    save_content(&router, &token, id).await;

    let (_, body) = send(
        &router,
        request("GET", &format!("/api/forms/{id}"), Some(&token), None),
    )
    .await;
    let share_url = body["shareUrl"].as_str().expect("share url").to_string();

    let (status, _) = send(
        &router,
        request(
            "POST",
            &format!("/f/{share_url}"),
            None,
            Some(serde_json::json!({ "name": "Jane" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_share_url_is_not_found() {
    let (router, _) = test_app();
    let (status, body) = send(&router, request("GET", "/f/ghost/content", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// ============================================================================
// Dashboard stats
// ============================================================================

#[tokio::test]
async fn test_stats_reflect_visits_and_submissions() {
    let (router, token) = test_app();
    let id = create_form(&router, &token).await;
    save_content(&router, &token, id).await;
    let share_url = publish(&router, &token, id).await;

    for _ in 0..4 {
        send(
            &router,
            request("GET", &format!("/f/{share_url}/content"), None, None),
        )
        .await;
    }
    send(
        &router,
        request(
            "POST",
            &format!("/f/{share_url}"),
            None,
            Some(serde_json::json!({ "name": "Jane" })),
        ),
    )
    .await;

    let (status, body) = send(&router, request("GET", "/api/stats", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visits"].as_i64(), Some(4));
    assert_eq!(body["submissions"].as_i64(), Some(1));
    assert_eq!(body["submissionRate"].as_f64(), Some(25.0));
    assert_eq!(body["bounceRate"].as_f64(), Some(75.0));
}

#[tokio::test]
async fn test_stats_with_no_visits() {
    let (router, token) = test_app();
    let (status, body) = send(&router, request("GET", "/api/stats", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visits"].as_i64(), Some(0));
    assert_eq!(body["submissionRate"].as_f64(), Some(0.0));
    assert_eq!(body["bounceRate"].as_f64(), Some(100.0));
}
