//! Agent Models

use serde::{Deserialize, Serialize};

/// An agent tasks can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier
    pub id: String,
    /// Agent display name
    pub name: String,
    /// Declared capabilities, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
    /// Agent lifecycle status (StatusID string)
    pub status: String,
}

/// Payload for registering an agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAgent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
}

impl NewAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: None,
        }
    }
}

/// All-optional agent patch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl AgentPatch {
    /// Apply this patch to an agent in place
    pub fn apply(&self, agent: &mut Agent) {
        if let Some(name) = &self.name {
            agent.name = name.clone();
        }
        if let Some(capabilities) = &self.capabilities {
            agent.capabilities = Some(capabilities.clone());
        }
        if let Some(status) = &self.status {
            agent.status = status.clone();
        }
    }
}
