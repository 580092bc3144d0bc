//! # formsmith-actions
//!
//! The persistence actions of the formsmith form builder: owner-scoped
//! CRUD over forms, the public share-link operations, dashboard
//! statistics, and the submissions table model.
//!
//! ## Modules
//!
//! - [`forms`] - The owner-scoped and public actions
//! - [`stats`] - [`FormStats`] rate math
//! - [`submissions`] - The [`SubmissionTable`] column/row model

pub mod forms;
pub mod stats;
pub mod submissions;

pub use forms::{
    create_form, get_form_by_id, get_form_by_share_url, get_form_content_by_url, get_form_stats,
    get_form_with_submissions, get_forms, publish_form, submit_form, update_form_content,
};
pub use stats::FormStats;
pub use submissions::{submission_table, SubmissionColumn, SubmissionRow, SubmissionTable};
