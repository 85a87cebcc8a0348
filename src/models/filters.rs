//! Filter and Sort Options
//!
//! Filter state is always fully populated; there is no partial filter object.
//! Sort fields form a closed union; unknown field names are rejected with a
//! validation error rather than silently ignored.

use serde::{Deserialize, Serialize};

use crate::utils::error::{StoreError, StoreResult};

/// Status filter: a meta-bucket derived from the taxonomy, or an exact match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// No status constraint
    #[default]
    Any,
    /// Non-terminal statuses only
    Active,
    /// Terminal statuses only (Completed, Failed, Cancelled)
    Completed,
    /// Exact status id, compared after normalization
    Exact(String),
}

impl StatusFilter {
    /// Wire representation for server-evaluated queries
    pub fn as_query_param(&self) -> Option<String> {
        match self {
            Self::Any => None,
            Self::Active => Some("active".to_string()),
            Self::Completed => Some("completed".to_string()),
            Self::Exact(id) => Some(id.clone()),
        }
    }
}

/// Task filter state. Every field is always present; `Default` is the
/// neutral filter (everything visible except archived tasks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFilters {
    /// Case-insensitive substring match over title and description
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Archived tasks are excluded unless explicitly requested
    #[serde(default)]
    pub include_archived: bool,
}

impl Default for TaskFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::Any,
            project_id: None,
            agent_id: None,
            include_archived: false,
        }
    }
}

impl TaskFilters {
    /// Filter to a single status meta-bucket or exact status
    pub fn with_status(status: StatusFilter) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }
}

/// Closed union of sortable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    /// Orders by the taxonomy's preferred status sequence
    Status,
    TaskNumber,
}

impl SortField {
    /// Parse a sort field name, rejecting unknown fields
    pub fn parse(s: &str) -> StoreResult<Self> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            "task_number" => Ok(Self::TaskNumber),
            other => Err(StoreError::validation(format!(
                "Unknown sort field: {other}"
            ))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    /// Newest-first is the default presentation order
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse a direction name, rejecting unknown values
    pub fn parse(s: &str) -> StoreResult<Self> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(StoreError::validation(format!(
                "Unknown sort direction: {other}"
            ))),
        }
    }
}

/// Sort options applied by the shared task comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortOptions {
    #[serde(default)]
    pub field: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortOptions {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}
