use crate::Result;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};

/// The summary document printed and committed at the end of a run
///
/// Every field is always serialized; statistics over empty sample lists are `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub names_of_adopters: Vec<String>,
    pub names_of_contributors: Vec<String>,
    pub names_of_contributors_new: Vec<String>,
    pub number_of_pull_request_new: u64,
    pub p50_number_of_new_pulls_per_week: Option<u64>,
    pub p50_number_of_new_contributors_per_week: Option<u64>,
    pub p50_seconds_to_close_pulls: Option<i64>,
    pub p50_seconds_to_close_issues: Option<i64>,
    pub mean_number_of_new_pulls_per_week: Option<f64>,
    pub mean_number_of_new_contributors_per_week: Option<f64>,
    pub mean_seconds_to_close_pulls: Option<f64>,
    pub mean_seconds_to_close_issues: Option<f64>,
}

impl MetricsSummary {
    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).into_app_err("unable to serialize metrics summary")
    }
}
