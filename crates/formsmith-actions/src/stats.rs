//! Owner dashboard statistics.

use serde::{Deserialize, Serialize};

/// Aggregate statistics across all of an owner's forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStats {
    /// Total fill-in view fetches.
    pub visits: i64,
    /// Total collected submissions.
    pub submissions: i64,
    /// `submissions / visits * 100` when there are visits, else 0.
    pub submission_rate: f64,
    /// `100 - submission_rate`.
    pub bounce_rate: f64,
}

impl FormStats {
    /// Computes the rates from raw counter totals.
    pub fn from_totals(visits: i64, submissions: i64) -> Self {
        let submission_rate = if visits > 0 {
            submissions as f64 / visits as f64 * 100.0
        } else {
            0.0
        };
        Self {
            visits,
            submissions,
            submission_rate,
            bounce_rate: 100.0 - submission_rate,
        }
    }
}
