//! The [`FormStore`] trait: the CRUD surface every backend implements.

use async_trait::async_trait;

use formsmith_core::error::FormsmithResult;

use crate::records::{FormRecord, NewForm, SubmissionRecord};

/// The storage backend contract.
///
/// Owner-scoped operations take the owner's id and filter every query on
/// it, so a form belonging to someone else is indistinguishable from a
/// missing form (`NotFound`). The three share-url operations are public.
///
/// Counter increments are atomic only within a single backend call; no
/// transaction spans multiple calls.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Creates a form: fresh share token, empty content, unpublished,
    /// zeroed counters.
    async fn create_form(&self, owner_id: &str, new_form: &NewForm) -> FormsmithResult<FormRecord>;

    /// Returns all of the owner's forms, newest first.
    async fn forms_for_owner(&self, owner_id: &str) -> FormsmithResult<Vec<FormRecord>>;

    /// Returns one of the owner's forms by id.
    async fn form_by_id(&self, owner_id: &str, id: i64) -> FormsmithResult<FormRecord>;

    /// Replaces the serialized content of one of the owner's forms.
    async fn update_content(
        &self,
        owner_id: &str,
        id: i64,
        content: &str,
    ) -> FormsmithResult<FormRecord>;

    /// Marks one of the owner's forms as published.
    async fn publish_form(&self, owner_id: &str, id: i64) -> FormsmithResult<FormRecord>;

    /// Returns the form with the given share token. Public.
    async fn form_by_share_url(&self, share_url: &str) -> FormsmithResult<FormRecord>;

    /// Increments the visit counter and returns the form's content.
    /// Public; backs the fill-in fetch.
    async fn visit_form(&self, share_url: &str) -> FormsmithResult<String>;

    /// Appends a submission and increments the submission counter, in one
    /// atomic step. Public; only succeeds against a published form.
    async fn submit_form(
        &self,
        share_url: &str,
        content: &str,
    ) -> FormsmithResult<SubmissionRecord>;

    /// Returns the submissions of one of the owner's forms, oldest first.
    async fn submissions_for_form(
        &self,
        owner_id: &str,
        id: i64,
    ) -> FormsmithResult<Vec<SubmissionRecord>>;

    /// Returns `(total visits, total submissions)` across all of the
    /// owner's forms.
    async fn owner_stats(&self, owner_id: &str) -> FormsmithResult<(i64, i64)>;
}
