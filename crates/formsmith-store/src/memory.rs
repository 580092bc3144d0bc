//! In-memory store backend.
//!
//! The primary test backend: a `tokio::sync::RwLock`-guarded table pair
//! with the same semantics as the SQLite backend.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use formsmith_core::error::{FormsmithError, FormsmithResult};
use formsmith_core::ids;

use crate::base::FormStore;
use crate::records::{FormRecord, NewForm, SubmissionRecord};

#[derive(Debug, Default)]
struct Tables {
    forms: Vec<FormRecord>,
    submissions: Vec<SubmissionRecord>,
    next_form_id: i64,
    next_submission_id: i64,
}

/// An in-memory [`FormStore`] backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found_form(id: i64) -> FormsmithError {
    FormsmithError::NotFound(format!("form {id}"))
}

fn not_found_share_url(share_url: &str) -> FormsmithError {
    FormsmithError::NotFound(format!("form with share url {share_url}"))
}

#[async_trait]
impl FormStore for MemoryStore {
    async fn create_form(&self, owner_id: &str, new_form: &NewForm) -> FormsmithResult<FormRecord> {
        let mut tables = self.tables.write().await;
        tables.next_form_id += 1;
        let record = FormRecord {
            id: tables.next_form_id,
            owner_id: owner_id.to_string(),
            name: new_form.name.clone(),
            description: new_form.description.clone(),
            content: "[]".to_string(),
            published: false,
            share_url: ids::share_token(),
            visits: 0,
            submissions: 0,
            created_at: Utc::now(),
        };
        tables.forms.push(record.clone());
        Ok(record)
    }

    async fn forms_for_owner(&self, owner_id: &str) -> FormsmithResult<Vec<FormRecord>> {
        let tables = self.tables.read().await;
        let mut forms: Vec<FormRecord> = tables
            .forms
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect();
        // Newest first; ids break created_at ties from fast successive inserts.
        forms.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(forms)
    }

    async fn form_by_id(&self, owner_id: &str, id: i64) -> FormsmithResult<FormRecord> {
        let tables = self.tables.read().await;
        tables
            .forms
            .iter()
            .find(|f| f.owner_id == owner_id && f.id == id)
            .cloned()
            .ok_or_else(|| not_found_form(id))
    }

    async fn update_content(
        &self,
        owner_id: &str,
        id: i64,
        content: &str,
    ) -> FormsmithResult<FormRecord> {
        let mut tables = self.tables.write().await;
        let form = tables
            .forms
            .iter_mut()
            .find(|f| f.owner_id == owner_id && f.id == id)
            .ok_or_else(|| not_found_form(id))?;
        form.content = content.to_string();
        Ok(form.clone())
    }

    async fn publish_form(&self, owner_id: &str, id: i64) -> FormsmithResult<FormRecord> {
        let mut tables = self.tables.write().await;
        let form = tables
            .forms
            .iter_mut()
            .find(|f| f.owner_id == owner_id && f.id == id)
            .ok_or_else(|| not_found_form(id))?;
        form.published = true;
        Ok(form.clone())
    }

    async fn form_by_share_url(&self, share_url: &str) -> FormsmithResult<FormRecord> {
        let tables = self.tables.read().await;
        tables
            .forms
            .iter()
            .find(|f| f.share_url == share_url)
            .cloned()
            .ok_or_else(|| not_found_share_url(share_url))
    }

    async fn visit_form(&self, share_url: &str) -> FormsmithResult<String> {
        let mut tables = self.tables.write().await;
        let form = tables
            .forms
            .iter_mut()
            .find(|f| f.share_url == share_url)
            .ok_or_else(|| not_found_share_url(share_url))?;
        form.visits += 1;
        Ok(form.content.clone())
    }

    async fn submit_form(
        &self,
        share_url: &str,
        content: &str,
    ) -> FormsmithResult<SubmissionRecord> {
        let mut tables = self.tables.write().await;
        let form_id = tables
            .forms
            .iter_mut()
            .find(|f| f.share_url == share_url && f.published)
            .map(|form| {
                form.submissions += 1;
                form.id
            })
            .ok_or_else(|| not_found_share_url(share_url))?;
        tables.next_submission_id += 1;
        let record = SubmissionRecord {
            id: tables.next_submission_id,
            form_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        tables.submissions.push(record.clone());
        Ok(record)
    }

    async fn submissions_for_form(
        &self,
        owner_id: &str,
        id: i64,
    ) -> FormsmithResult<Vec<SubmissionRecord>> {
        let tables = self.tables.read().await;
        tables
            .forms
            .iter()
            .find(|f| f.owner_id == owner_id && f.id == id)
            .ok_or_else(|| not_found_form(id))?;
        let mut submissions: Vec<SubmissionRecord> = tables
            .submissions
            .iter()
            .filter(|s| s.form_id == id)
            .cloned()
            .collect();
        submissions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(submissions)
    }

    async fn owner_stats(&self, owner_id: &str) -> FormsmithResult<(i64, i64)> {
        let tables = self.tables.read().await;
        let (visits, submissions) = tables
            .forms
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .fold((0, 0), |(v, s), f| (v + f.visits, s + f.submissions));
        Ok((visits, submissions))
    }
}
