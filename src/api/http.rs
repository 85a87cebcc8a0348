//! HTTP API Client
//!
//! Default reqwest-backed implementation of the per-entity API traits.
//! Kept deliberately thin: JSON in, JSON out, non-success statuses mapped to
//! [`ApiError::Status`]. Auth headers, retries, and base-URL discovery are
//! the embedding application's concern.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{
    AgentApi, ApiError, ApiResult, MandateApi, ProjectApi, TaskApi, TaskQuery, TemplateApi,
};
use crate::models::{
    Agent, AgentPatch, Mandate, MandatePatch, NewAgent, NewMandate, NewProject, NewTask,
    NewTemplate, Project, ProjectPatch, Task, TaskId, TaskPatch, Template,
};

/// Reqwest-backed API client for all entity types.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    /// Create a client for the given base URL (trailing slash optional)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client reusing an existing reqwest client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        self.url(&format!(
            "/api/projects/{}/tasks/{}",
            id.project_id, id.task_number
        ))
    }
}

/// Reject non-success responses, carrying the body text as the message.
async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

async fn json_of<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    Ok(check(response).await?.json().await?)
}

async fn discard(response: reqwest::Response) -> ApiResult<()> {
    check(response).await.map(|_| ())
}

#[async_trait]
impl TaskApi for HttpApi {
    async fn list_tasks(&self, query: &TaskQuery) -> ApiResult<Vec<Task>> {
        let response = self
            .client
            .get(self.url("/api/tasks"))
            .query(query)
            .send()
            .await?;
        json_of(response).await
    }

    async fn create_task(&self, new: &NewTask) -> ApiResult<Task> {
        let response = self
            .client
            .post(self.url("/api/tasks"))
            .json(new)
            .send()
            .await?;
        json_of(response).await
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> ApiResult<Task> {
        let response = self
            .client
            .patch(self.task_url(id))
            .json(patch)
            .send()
            .await?;
        json_of(response).await
    }

    async fn delete_task(&self, id: &TaskId) -> ApiResult<()> {
        let response = self.client.delete(self.task_url(id)).send().await?;
        discard(response).await
    }
}

#[async_trait]
impl ProjectApi for HttpApi {
    async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        let response = self.client.get(self.url("/api/projects")).send().await?;
        json_of(response).await
    }

    async fn create_project(&self, new: &NewProject) -> ApiResult<Project> {
        let response = self
            .client
            .post(self.url("/api/projects"))
            .json(new)
            .send()
            .await?;
        json_of(response).await
    }

    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> ApiResult<Project> {
        let response = self
            .client
            .patch(self.url(&format!("/api/projects/{id}")))
            .json(patch)
            .send()
            .await?;
        json_of(response).await
    }

    async fn delete_project(&self, id: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/projects/{id}")))
            .send()
            .await?;
        discard(response).await
    }
}

#[async_trait]
impl AgentApi for HttpApi {
    async fn list_agents(&self) -> ApiResult<Vec<Agent>> {
        let response = self.client.get(self.url("/api/agents")).send().await?;
        json_of(response).await
    }

    async fn create_agent(&self, new: &NewAgent) -> ApiResult<Agent> {
        let response = self
            .client
            .post(self.url("/api/agents"))
            .json(new)
            .send()
            .await?;
        json_of(response).await
    }

    async fn update_agent(&self, id: &str, patch: &AgentPatch) -> ApiResult<Agent> {
        let response = self
            .client
            .patch(self.url(&format!("/api/agents/{id}")))
            .json(patch)
            .send()
            .await?;
        json_of(response).await
    }

    async fn delete_agent(&self, id: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/agents/{id}")))
            .send()
            .await?;
        discard(response).await
    }
}

#[async_trait]
impl TemplateApi for HttpApi {
    async fn list_templates(&self) -> ApiResult<Vec<Template>> {
        let response = self.client.get(self.url("/api/templates")).send().await?;
        json_of(response).await
    }

    async fn create_template(&self, new: &NewTemplate) -> ApiResult<Template> {
        let response = self
            .client
            .post(self.url("/api/templates"))
            .json(new)
            .send()
            .await?;
        json_of(response).await
    }

    async fn delete_template(&self, id: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/templates/{id}")))
            .send()
            .await?;
        discard(response).await
    }
}

#[async_trait]
impl MandateApi for HttpApi {
    async fn list_mandates(&self) -> ApiResult<Vec<Mandate>> {
        let response = self.client.get(self.url("/api/mandates")).send().await?;
        json_of(response).await
    }

    async fn create_mandate(&self, new: &NewMandate) -> ApiResult<Mandate> {
        let response = self
            .client
            .post(self.url("/api/mandates"))
            .json(new)
            .send()
            .await?;
        json_of(response).await
    }

    async fn update_mandate(&self, id: &str, patch: &MandatePatch) -> ApiResult<Mandate> {
        let response = self
            .client
            .patch(self.url(&format!("/api/mandates/{id}")))
            .json(patch)
            .send()
            .await?;
        json_of(response).await
    }

    async fn delete_mandate(&self, id: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/mandates/{id}")))
            .send()
            .await?;
        discard(response).await
    }
}
