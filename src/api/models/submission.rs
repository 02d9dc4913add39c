use super::common::{RecordId, deserialize_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// A facility assessment collected by the mobile client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: RecordId,
    #[serde(default)]
    pub facility_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub lga: Option<String>,
    #[serde(default)]
    pub sync_status: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Submission {
    pub fn sync_status_or_pending(&self) -> &str {
        self.sync_status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("pending")
    }
}

/// Server-side filters for the submissions listing. Unset filters are not
/// sent at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub state: Option<String>,
    pub lga: Option<String>,
    pub sync_status: Option<String>,
}

impl SubmissionFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [
            ("state", &self.state),
            ("lga", &self.lga),
            ("sync_status", &self.sync_status),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .filter(|v| !v.is_empty())
                .map(|v| (key, v.clone()))
        })
        .collect()
    }
}

/// Distinct, sorted, non-empty state names, for filter choices.
pub fn distinct_states(submissions: &[Submission]) -> Vec<String> {
    distinct(submissions.iter().map(|s| s.state.as_deref()))
}

/// Distinct, sorted, non-empty LGA names, for filter choices.
pub fn distinct_lgas(submissions: &[Submission]) -> Vec<String> {
    distinct(submissions.iter().map(|s| s.lga.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
