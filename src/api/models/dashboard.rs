use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    #[serde(default)]
    pub total_submissions: u64,
    #[serde(default)]
    pub synced_submissions: u64,
    #[serde(default)]
    pub pending_submissions: u64,
    #[serde(default)]
    pub synced_percentage: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_facilities: u64,
    #[serde(default)]
    pub data_completeness_percentage: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Detailed analytics. Only the summary is typed; the per-topic sections
/// (facility, funding, infrastructure, ...) are passed through as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalytics {
    #[serde(default)]
    pub summary: Option<AnalyticsSummary>,
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

impl DetailedAnalytics {
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }
}
