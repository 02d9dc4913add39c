// Models module - contains Field, FormSchema, Form and the reporting payloads

pub mod common;
pub mod dashboard;
pub mod field;
pub mod form;
pub mod insights;
pub mod schema;
pub mod submission;
pub mod user;

pub use common::RecordId;
pub use dashboard::{AnalyticsSummary, DashboardOverview, DetailedAnalytics};
pub use field::{FieldDefinition, FieldId, FieldKind, FieldType, SchemaField};
pub use form::{Form, FormDraft};
pub use insights::{
    AiAnalysis, AtRiskFacility, AtRiskReport, IssuesAnalysis, Predictions, Recommendations,
    SubmissionInsights, TextAnalysis,
};
pub use schema::FormSchema;
pub use submission::{Submission, SubmissionFilter};
pub use user::{LoginResponse, NewUser, User, UserRole};
