//! The persistence actions.
//!
//! Thin async functions over a [`FormStore`]. Owner-scoped actions take
//! the resolved [`Actor`] and filter on its id; there is no separate
//! authorization layer. The three share-url actions are public.

use std::collections::HashMap;

use formsmith_auth::Actor;
use formsmith_core::error::{FormsmithError, FormsmithResult, ValidationError};
use formsmith_fields::element::{parse_content, serialize_content, FormElementInstance};
use formsmith_fields::registry::validate;
use formsmith_store::base::FormStore;
use formsmith_store::records::{FormRecord, NewForm, SubmissionRecord};

use crate::stats::FormStats;

/// Creates a form for the actor and returns its id.
///
/// # Errors
///
/// Returns a validation error if the input violates the name or
/// description bounds.
pub async fn create_form(
    store: &dyn FormStore,
    actor: &Actor,
    new_form: &NewForm,
) -> FormsmithResult<i64> {
    new_form.validate()?;
    let form = store.create_form(&actor.id, new_form).await?;
    tracing::info!(form_id = form.id, owner = %actor.id, "created form");
    Ok(form.id)
}

/// Returns all of the actor's forms, newest first.
pub async fn get_forms(store: &dyn FormStore, actor: &Actor) -> FormsmithResult<Vec<FormRecord>> {
    store.forms_for_owner(&actor.id).await
}

/// Returns one of the actor's forms by id.
pub async fn get_form_by_id(
    store: &dyn FormStore,
    actor: &Actor,
    id: i64,
) -> FormsmithResult<FormRecord> {
    store.form_by_id(&actor.id, id).await
}

/// Saves the designer's element list as the form's content.
pub async fn update_form_content(
    store: &dyn FormStore,
    actor: &Actor,
    id: i64,
    elements: &[FormElementInstance],
) -> FormsmithResult<FormRecord> {
    let content = serialize_content(elements)?;
    let form = store.update_content(&actor.id, id, &content).await?;
    tracing::info!(form_id = id, elements = elements.len(), "saved form content");
    Ok(form)
}

/// Publishes one of the actor's forms.
pub async fn publish_form(
    store: &dyn FormStore,
    actor: &Actor,
    id: i64,
) -> FormsmithResult<FormRecord> {
    let form = store.publish_form(&actor.id, id).await?;
    tracing::info!(form_id = id, share_url = %form.share_url, "published form");
    Ok(form)
}

/// Returns the actor's dashboard statistics.
pub async fn get_form_stats(store: &dyn FormStore, actor: &Actor) -> FormsmithResult<FormStats> {
    let (visits, submissions) = store.owner_stats(&actor.id).await?;
    Ok(FormStats::from_totals(visits, submissions))
}

/// Returns one of the actor's forms together with its submissions,
/// oldest submission first.
pub async fn get_form_with_submissions(
    store: &dyn FormStore,
    actor: &Actor,
    id: i64,
) -> FormsmithResult<(FormRecord, Vec<SubmissionRecord>)> {
    let form = store.form_by_id(&actor.id, id).await?;
    let submissions = store.submissions_for_form(&actor.id, id).await?;
    Ok((form, submissions))
}

/// Returns the form with the given share token. Public.
pub async fn get_form_by_share_url(
    store: &dyn FormStore,
    share_url: &str,
) -> FormsmithResult<FormRecord> {
    store.form_by_share_url(share_url).await
}

/// Fetches a form's element list for the fill-in view, counting a
/// visit. Public.
pub async fn get_form_content_by_url(
    store: &dyn FormStore,
    share_url: &str,
) -> FormsmithResult<Vec<FormElementInstance>> {
    let content = store.visit_form(share_url).await?;
    parse_content(&content)
}

/// Collects a submission against a published form. Public.
///
/// Every submitted key must resolve to an element of the form, and
/// every required input must carry a non-empty value. An unpublished
/// form is indistinguishable from a missing one.
///
/// # Errors
///
/// Returns `NotFound` for an unknown share url or an unpublished form,
/// or a compound validation error keyed by element id.
pub async fn submit_form(
    store: &dyn FormStore,
    share_url: &str,
    values: &HashMap<String, String>,
) -> FormsmithResult<SubmissionRecord> {
    let form = store.form_by_share_url(share_url).await?;
    if !form.published {
        return Err(FormsmithError::NotFound(format!(
            "form with share url {share_url}"
        )));
    }
    let elements = parse_content(&form.content)?;

    let mut field_errors: HashMap<String, Vec<ValidationError>> = HashMap::new();
    for key in values.keys() {
        if !elements.iter().any(|element| &element.id == key) {
            field_errors.insert(
                key.clone(),
                vec![ValidationError::new(
                    "No such element on this form.",
                    "unknown_element",
                )],
            );
        }
    }
    for element in &elements {
        let raw = values.get(&element.id).map_or("", String::as_str);
        if !validate(element, raw) {
            field_errors.entry(element.id.clone()).or_default().push(
                ValidationError::new("This field is required.", "required"),
            );
        }
    }
    if !field_errors.is_empty() {
        tracing::warn!(
            share_url,
            invalid = field_errors.len(),
            "rejected submission"
        );
        return Err(ValidationError::with_field_errors(field_errors).into());
    }

    let content = serde_json::to_string(values)?;
    let submission = store.submit_form(share_url, &content).await?;
    tracing::info!(form_id = submission.form_id, "collected submission");
    Ok(submission)
}
