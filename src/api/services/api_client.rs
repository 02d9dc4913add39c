//! HTTP client for the PFMO backend.
//!
//! Every request carries the stored bearer token when there is one. A 401
//! clears that token and comes back as [`ClientError::Unauthorized`]; any
//! other refusal comes back as [`ClientError::Rejected`] with the backend's
//! `detail` message untouched.

use crate::config::AppConfig;
use crate::models::{
    AtRiskReport, DashboardOverview, DetailedAnalytics, Form, FormDraft, NewUser, RecordId,
    Recommendations, Submission, SubmissionFilter, SubmissionInsights, TextAnalysis, User,
};
use crate::storage::{ClientError, FormsBackend, SessionStore};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

const API_PREFIX: &str = "/api/v1";

pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- auth & users ----

    pub async fn me(&self) -> Result<User, ClientError> {
        self.get_json("/auth/me").await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_json("/auth/users").await
    }

    pub async fn register_user(&self, user: &NewUser) -> Result<User, ClientError> {
        let request = self.request(Method::POST, "/auth/register")?.json(user);
        self.fetch(request).await
    }

    pub async fn delete_user(&self, id: &RecordId) -> Result<(), ClientError> {
        let path = format!("/auth/users/{}", segment(id));
        let request = self.request(Method::DELETE, &path)?;
        self.send(request).await.map(|_| ())
    }

    // ---- submissions & dashboard ----

    pub async fn list_submissions(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Vec<Submission>, ClientError> {
        let request = self
            .request(Method::GET, "/submissions/submissions")?
            .query(&filter.to_query());
        self.fetch(request).await
    }

    pub async fn dashboard_overview(&self) -> Result<DashboardOverview, ClientError> {
        self.get_json("/dashboard/overview").await
    }

    pub async fn detailed_analytics(&self) -> Result<DetailedAnalytics, ClientError> {
        self.get_json("/dashboard/detailed-analytics").await
    }

    // ---- AI insights ----

    pub async fn at_risk_facilities(&self) -> Result<AtRiskReport, ClientError> {
        self.get_json("/ai/facilities/at-risk").await
    }

    pub async fn recommendations(&self) -> Result<Recommendations, ClientError> {
        self.get_json("/ai/recommendations").await
    }

    pub async fn submission_insights(
        &self,
        submission_id: &RecordId,
    ) -> Result<SubmissionInsights, ClientError> {
        self.get_json(&format!("/ai/submission/{}/insights", segment(submission_id)))
            .await
    }

    pub async fn analyze_text(&self, text: &str) -> Result<TextAnalysis, ClientError> {
        if text.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "Text to analyze must not be empty".to_string(),
            ));
        }
        let request = self
            .request(Method::POST, "/ai/analyze-text")?
            .json(&json!({ "text": text }));
        self.fetch(request).await
    }

    // ---- plumbing ----

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.url(path)?;
        debug!(%method, %url, "Backend request");
        let mut request = self.client.request(method, url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send and map failures. A 401 clears the stored token.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            if self.session.clear_token()? {
                warn!("Session token rejected by backend, cleared");
            }
            return Err(ClientError::Unauthorized);
        }
        Err(rejection(response).await)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.request(Method::GET, path)?;
        self.fetch(request).await
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!("{}{}{}", self.base_url, API_PREFIX, path);
        Url::parse(&raw).map_err(|e| ClientError::InvalidInput(format!("Bad URL {}: {}", raw, e)))
    }
}

/// Turn a non-success response into `Rejected`, preferring the backend's
/// `detail` message.
pub(crate) async fn rejection(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ClientError::rejected(status, error_detail(&body, status))
}

fn error_detail(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(detail) if !detail.is_null() => return detail.to_string(),
            _ => {}
        }
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn segment(id: &RecordId) -> String {
    urlencoding::encode(&id.to_string()).into_owned()
}

#[async_trait]
impl FormsBackend for ApiClient {
    async fn list_forms(&self, active_only: bool) -> Result<Vec<Form>, ClientError> {
        let request = self
            .request(Method::GET, "/forms/forms")?
            .query(&[("active_only", active_only)]);
        self.fetch(request).await
    }

    async fn create_form(&self, draft: &FormDraft) -> Result<Form, ClientError> {
        let request = self.request(Method::POST, "/forms/create")?.json(draft);
        self.fetch(request).await
    }

    async fn update_form(&self, id: &RecordId, draft: &FormDraft) -> Result<Form, ClientError> {
        let path = format!("/forms/forms/{}", segment(id));
        let request = self.request(Method::PUT, &path)?.json(draft);
        self.fetch(request).await
    }

    async fn delete_form(&self, id: &RecordId, permanent: bool) -> Result<(), ClientError> {
        let path = format!("/forms/forms/{}", segment(id));
        let request = self
            .request(Method::DELETE, &path)?
            .query(&[("permanent", permanent)]);
        self.send(request).await.map(|_| ())
    }
}
