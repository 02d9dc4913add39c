//! AI-derived insight payloads.

use super::common::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtRiskFacility {
    pub id: RecordId,
    #[serde(default)]
    pub facility_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub lga: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtRiskReport {
    #[serde(default)]
    pub total_at_risk: u64,
    #[serde(default)]
    pub facilities: Vec<AtRiskFacility>,
}

/// Recommendations grouped by category.
pub type Recommendations = BTreeMap<String, Vec<Value>>;

/// Result of `/ai/analyze-text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuesAnalysis {
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    #[serde(default)]
    pub priority_level: String,
    #[serde(default)]
    pub predicted_needs: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(default)]
    pub issues_analysis: Option<IssuesAnalysis>,
    #[serde(default)]
    pub predictions: Option<Predictions>,
    #[serde(default)]
    pub anomalies: Vec<Value>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionInsights {
    #[serde(default)]
    pub ai_analysis: AiAnalysis,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Render a recommendation item: strings as-is, anything else as JSON.
pub fn recommendation_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
