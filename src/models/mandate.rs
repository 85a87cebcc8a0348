//! Mandate Models
//!
//! A mandate is a standing directive for agents, tracked through the same
//! status taxonomy as tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A standing directive for agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mandate {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status (StatusID string)
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a mandate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMandate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewMandate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }
}

/// All-optional mandate patch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MandatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl MandatePatch {
    /// Apply this patch to a mandate in place
    pub fn apply(&self, mandate: &mut Mandate) {
        if let Some(title) = &self.title {
            mandate.title = title.clone();
        }
        if let Some(description) = &self.description {
            mandate.description = Some(description.clone());
        }
        if let Some(status) = &self.status {
            mandate.status = status.clone();
        }
    }
}
