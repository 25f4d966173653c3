//! Backend API Client
//!
//! Uniform request execution against the ProjectHub backend. Every
//! operation resolves to `Result<T, ApiError>` - a value or exactly one
//! normalized error, never a panic or a raw transport exception:
//!
//! - the stored bearer token is attached when present, and only then
//! - non-success statuses surface the `message` field of the error body,
//!   falling back to `HTTP <status>`
//! - transport failures (unreachable host, DNS) normalize to a generic
//!   network error; the cause goes to the log
//! - `204 No Content` decodes as JSON `null` instead of choking on the
//!   empty body
//!
//! The client never mutates the session store. Persisting a successful
//! login is the caller's job.

use crate::egui_app::config::Config;
use crate::egui_app::session::SessionStore;
use crate::egui_app::types::{
    AuthResponse, DeliverableDraft, EvaluationDraft, EvaluationUpdate, GroupDraft, GroupUpdate,
    LoginRequest, ProjectDraft, ProjectUpdate, RegisterRequest,
};
use crate::shared::error::ApiError;
use crate::shared::models::{Deliverable, Evaluation, Group, Project, Promotion, Role, UserSummary};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Error body shape the backend uses for non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the ProjectHub backend
pub struct ApiClient {
    config: Config,
    store: Arc<SessionStore>,
    client: Client,
}

impl ApiClient {
    pub fn new(config: Config, store: Arc<SessionStore>) -> Self {
        Self {
            config,
            store,
            client: Client::new(),
        }
    }

    // --- auth ---

    /// Authenticate with email and password. Does not touch the session
    /// store; the caller persists the returned session on success.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let url = self.config.api_url("/auth/login");
        self.execute(self.client.post(url).json(&request))
    }

    /// Create an account
    pub fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
        role: Role,
    ) -> Result<UserSummary, ApiError> {
        let request = RegisterRequest {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
            role,
        };
        let url = self.config.api_url("/auth/register");
        self.execute(self.client.post(url).json(&request))
    }

    // --- projects ---

    pub fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.execute(self.client.get(self.config.api_url("/projects")))
    }

    pub fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        self.execute(self.client.post(self.config.api_url("/projects")).json(draft))
    }

    pub fn update_project(&self, id: i64, update: &ProjectUpdate) -> Result<Project, ApiError> {
        let url = self.config.api_url(&format!("/projects/{}", id));
        self.execute(self.client.patch(url).json(update))
    }

    pub fn delete_project(&self, id: i64) -> Result<(), ApiError> {
        let url = self.config.api_url(&format!("/projects/{}", id));
        self.execute(self.client.delete(url))
    }

    // --- groups ---

    /// List groups, optionally scoped to one project
    pub fn list_groups(&self, project_id: Option<i64>) -> Result<Vec<Group>, ApiError> {
        let path = match project_id {
            Some(id) => format!("/groups?project_id={}", id),
            None => "/groups".to_string(),
        };
        self.execute(self.client.get(self.config.api_url(&path)))
    }

    pub fn create_group(&self, draft: &GroupDraft) -> Result<Group, ApiError> {
        self.execute(self.client.post(self.config.api_url("/groups")).json(draft))
    }

    /// Join an existing group as the given user
    pub fn join_group(&self, group_id: i64, user_id: i64) -> Result<Group, ApiError> {
        let update = GroupUpdate {
            name: None,
            add_member_id: Some(user_id),
            remove_member_id: None,
        };
        let url = self.config.api_url(&format!("/groups/{}", group_id));
        self.execute(self.client.patch(url).json(&update))
    }

    /// Leave a group
    pub fn leave_group(&self, group_id: i64, user_id: i64) -> Result<Group, ApiError> {
        let update = GroupUpdate {
            name: None,
            add_member_id: None,
            remove_member_id: Some(user_id),
        };
        let url = self.config.api_url(&format!("/groups/{}", group_id));
        self.execute(self.client.patch(url).json(&update))
    }

    pub fn delete_group(&self, id: i64) -> Result<(), ApiError> {
        let url = self.config.api_url(&format!("/groups/{}", id));
        self.execute(self.client.delete(url))
    }

    // --- promotions ---

    pub fn list_promotions(&self) -> Result<Vec<Promotion>, ApiError> {
        self.execute(self.client.get(self.config.api_url("/promotions")))
    }

    // --- deliverables ---

    pub fn list_deliverables(&self, group_id: i64) -> Result<Vec<Deliverable>, ApiError> {
        let url = self
            .config
            .api_url(&format!("/deliverables?group_id={}", group_id));
        self.execute(self.client.get(url))
    }

    pub fn submit_deliverable(&self, draft: &DeliverableDraft) -> Result<Deliverable, ApiError> {
        let url = self.config.api_url("/deliverables");
        self.execute(self.client.post(url).json(draft))
    }

    pub fn delete_deliverable(&self, id: i64) -> Result<(), ApiError> {
        let url = self.config.api_url(&format!("/deliverables/{}", id));
        self.execute(self.client.delete(url))
    }

    // --- evaluations ---

    pub fn list_evaluations(&self, group_id: i64) -> Result<Vec<Evaluation>, ApiError> {
        let url = self
            .config
            .api_url(&format!("/evaluations?group_id={}", group_id));
        self.execute(self.client.get(url))
    }

    /// Record a grade and/or defense slot for a group
    pub fn record_evaluation(&self, draft: &EvaluationDraft) -> Result<Evaluation, ApiError> {
        let url = self.config.api_url("/evaluations");
        self.execute(self.client.post(url).json(draft))
    }

    pub fn update_evaluation(
        &self,
        id: i64,
        update: &EvaluationUpdate,
    ) -> Result<Evaluation, ApiError> {
        let url = self.config.api_url(&format!("/evaluations/{}", id));
        self.execute(self.client.patch(url).json(update))
    }

    // --- plumbing ---

    /// Attach the credential, run the request on a fresh runtime, and
    /// normalize the outcome.
    fn execute<T: DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        if let Some(token) = self.store.get_token() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let rt = Runtime::new().map_err(|e| {
            tracing::error!("failed to create runtime: {}", e);
            ApiError::network()
        })?;

        rt.block_on(async move {
            let response = request.send().await.map_err(|e| {
                tracing::warn!("transport failure: {}", e);
                ApiError::network()
            })?;

            let status = response.status();

            if status == StatusCode::NO_CONTENT {
                // Empty body; decode as JSON null so () and Option targets work
                return serde_json::from_value(serde_json::Value::Null)
                    .map_err(|e| ApiError::decode(e.to_string()));
            }

            if !status.is_success() {
                let message = match response.json::<ErrorBody>().await {
                    Ok(body) => body
                        .message
                        .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
                    Err(_) => format!("HTTP {}", status.as_u16()),
                };
                return Err(ApiError::status(status.as_u16(), message));
            }

            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::decode(e.to_string()))
        })
    }
}
