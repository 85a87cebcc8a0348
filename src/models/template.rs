//! Task Template Models

use serde::{Deserialize, Serialize};

/// A reusable task template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Template body substituted into new tasks
    pub content: String,
}

/// Payload for creating a template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
}

impl NewTemplate {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            content: content.into(),
        }
    }
}
