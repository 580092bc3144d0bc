//! Route table and handlers.
//!
//! Owner routes live under `/api` and authenticate through
//! [`CurrentActor`]; the public share-link surface lives under `/f`.
//! Handlers are thin: extract, call the action, serialize.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use formsmith_actions as actions;
use formsmith_fields::element::FormElementInstance;
use formsmith_store::records::NewForm;

use crate::app::{share_link, AppState};
use crate::error::ApiError;
use crate::extract::CurrentActor;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/forms", post(create_form).get(list_forms))
        .route("/api/forms/{id}", get(get_form))
        .route("/api/forms/{id}/content", put(update_content))
        .route("/api/forms/{id}/publish", post(publish_form))
        .route("/api/forms/{id}/submissions", get(form_submissions))
        .route("/api/stats", get(owner_stats))
        .route("/f/{share_url}", get(public_form).post(submit_form))
        .route("/f/{share_url}/content", get(public_form_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn create_form(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(new_form): Json<NewForm>,
) -> Result<impl IntoResponse, ApiError> {
    let id = actions::create_form(state.store.as_ref(), &actor, &new_form).await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

async fn list_forms(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<impl IntoResponse, ApiError> {
    let forms = actions::get_forms(state.store.as_ref(), &actor).await?;
    Ok(Json(forms))
}

async fn get_form(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let form = actions::get_form_by_id(state.store.as_ref(), &actor, id).await?;
    Ok(Json(form))
}

async fn update_content(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<i64>,
    Json(elements): Json<Vec<FormElementInstance>>,
) -> Result<impl IntoResponse, ApiError> {
    let form =
        actions::update_form_content(state.store.as_ref(), &actor, id, &elements).await?;
    Ok(Json(form))
}

async fn publish_form(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let form = actions::publish_form(state.store.as_ref(), &actor, id).await?;
    let link = share_link(&state.settings, &form);
    Ok(Json(serde_json::json!({ "form": form, "shareLink": link })))
}

async fn form_submissions(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let (form, submissions) =
        actions::get_form_with_submissions(state.store.as_ref(), &actor, id).await?;
    let table = actions::submission_table(&form, &submissions)?;
    Ok(Json(serde_json::json!({ "form": form, "table": table })))
}

async fn owner_stats(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<impl IntoResponse, ApiError> {
    let stats = actions::get_form_stats(state.store.as_ref(), &actor).await?;
    Ok(Json(stats))
}

async fn public_form(
    State(state): State<AppState>,
    Path(share_url): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let form = actions::get_form_by_share_url(state.store.as_ref(), &share_url).await?;
    Ok(Json(form))
}

async fn public_form_content(
    State(state): State<AppState>,
    Path(share_url): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let elements =
        actions::get_form_content_by_url(state.store.as_ref(), &share_url).await?;
    Ok(Json(elements))
}

async fn submit_form(
    State(state): State<AppState>,
    Path(share_url): Path<String>,
    Json(values): Json<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = actions::submit_form(state.store.as_ref(), &share_url, &values).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}
