//! External API Interface
//!
//! Abstract, per-entity function sets over the remote REST-style API. Stores
//! depend only on these traits; transport and serialization mechanics beyond
//! the JSON entity shapes live behind them. [`HttpApi`] is the default
//! reqwest-backed implementation.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    Agent, AgentPatch, Mandate, MandatePatch, NewAgent, NewMandate, NewProject, NewTask,
    NewTemplate, Project, ProjectPatch, SortDirection, SortField, SortOptions, Task, TaskFilters,
    TaskId, TaskPatch, Template,
};

pub mod http;

pub use http::HttpApi;

/// Transport-boundary error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-success HTTP response
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection/transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not decode to the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Wire query for task collection endpoints, serialized to query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub include_archived: bool,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl TaskQuery {
    /// Build the wire query for the current filter and sort state
    pub fn new(filters: &TaskFilters, sort: &SortOptions) -> Self {
        let search = filters.search.trim();
        Self {
            status: filters.status.as_query_param(),
            project_id: filters.project_id.clone(),
            agent_id: filters.agent_id.clone(),
            search: (!search.is_empty()).then(|| search.to_string()),
            include_archived: filters.include_archived,
            sort: sort.field,
            direction: sort.direction,
        }
    }
}

/// Task collection and item endpoints.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self, query: &TaskQuery) -> ApiResult<Vec<Task>>;
    async fn create_task(&self, new: &NewTask) -> ApiResult<Task>;
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> ApiResult<Task>;
    async fn delete_task(&self, id: &TaskId) -> ApiResult<()>;
}

/// Project collection and item endpoints.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list_projects(&self) -> ApiResult<Vec<Project>>;
    async fn create_project(&self, new: &NewProject) -> ApiResult<Project>;
    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> ApiResult<Project>;
    async fn delete_project(&self, id: &str) -> ApiResult<()>;
}

/// Agent collection and item endpoints.
#[async_trait]
pub trait AgentApi: Send + Sync {
    async fn list_agents(&self) -> ApiResult<Vec<Agent>>;
    async fn create_agent(&self, new: &NewAgent) -> ApiResult<Agent>;
    async fn update_agent(&self, id: &str, patch: &AgentPatch) -> ApiResult<Agent>;
    async fn delete_agent(&self, id: &str) -> ApiResult<()>;
}

/// Template collection and item endpoints.
#[async_trait]
pub trait TemplateApi: Send + Sync {
    async fn list_templates(&self) -> ApiResult<Vec<Template>>;
    async fn create_template(&self, new: &NewTemplate) -> ApiResult<Template>;
    async fn delete_template(&self, id: &str) -> ApiResult<()>;
}

/// Mandate collection and item endpoints.
#[async_trait]
pub trait MandateApi: Send + Sync {
    async fn list_mandates(&self) -> ApiResult<Vec<Mandate>>;
    async fn create_mandate(&self, new: &NewMandate) -> ApiResult<Mandate>;
    async fn update_mandate(&self, id: &str, patch: &MandatePatch) -> ApiResult<Mandate>;
    async fn delete_mandate(&self, id: &str) -> ApiResult<()>;
}
