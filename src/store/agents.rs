//! Agent Store

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::AgentApi;
use crate::models::{Agent, AgentPatch, NewAgent};
use crate::poll::Pollable;
use crate::store::core::StoreCore;
use crate::store::events::{EventBus, StoreEvent};
use crate::utils::error::{MutationKind, StoreError, StoreResult};

/// Store for registered agents. Removal publishes
/// [`StoreEvent::AgentRemoved`] so the task store can unassign affected
/// tasks.
pub struct AgentStore {
    core: StoreCore,
    agents: Vec<Agent>,
    polling_error: Option<String>,
    fetch_epoch: u64,
    api: Arc<dyn AgentApi>,
    events: EventBus,
}

impl AgentStore {
    pub fn new(api: Arc<dyn AgentApi>, events: EventBus) -> Self {
        Self {
            core: StoreCore::new(),
            agents: Vec::new(),
            polling_error: None,
            fetch_epoch: 0,
            api,
            events,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn loading(&self) -> bool {
        self.core.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.core.error()
    }

    pub fn clear_error(&mut self) {
        self.core.clear_error();
    }

    pub fn polling_error(&self) -> Option<&str> {
        self.polling_error.as_deref()
    }

    pub fn clear_polling_error(&mut self) {
        self.polling_error = None;
    }

    pub async fn fetch_agents(&mut self) -> StoreResult<()> {
        self.core.begin();
        let token = self.begin_fetch();
        let result = match self.api.list_agents().await {
            Ok(agents) => {
                self.finish_fetch(token, agents);
                Ok(())
            }
            Err(err) => Err(StoreError::fetch(err.to_string())),
        };
        self.core.settle(result)
    }

    pub async fn add_agent(&mut self, new: NewAgent) -> StoreResult<Agent> {
        self.core.begin();
        if new.name.trim().is_empty() {
            return self
                .core
                .settle(Err(StoreError::validation("Agent name must not be empty")));
        }
        let result = match self.api.create_agent(&new).await {
            Ok(agent) => {
                match self.position(&agent.id) {
                    Some(pos) => self.agents[pos] = agent.clone(),
                    None => self.agents.insert(0, agent.clone()),
                }
                Ok(agent)
            }
            Err(err) => Err(StoreError::mutation(MutationKind::Create, err.to_string())),
        };
        self.core.settle(result)
    }

    pub async fn edit_agent(&mut self, id: &str, patch: AgentPatch) -> StoreResult<Agent> {
        self.core.begin();
        let Some(pos) = self.position(id) else {
            return self
                .core
                .settle(Err(StoreError::validation(format!("Unknown agent: {id}"))));
        };
        let snapshot = self.agents[pos].clone();
        patch.apply(&mut self.agents[pos]);

        let result = match self.api.update_agent(id, &patch).await {
            Ok(confirmed) => {
                if let Some(pos) = self.position(id) {
                    self.agents[pos] = confirmed.clone();
                }
                Ok(confirmed)
            }
            Err(err) => {
                tracing::warn!(agent = %id, "rolling back optimistic edit: {err}");
                if let Some(pos) = self.position(id) {
                    self.agents[pos] = snapshot;
                }
                Err(StoreError::mutation(MutationKind::Update, err.to_string()))
            }
        };
        self.core.settle(result)
    }

    pub async fn remove_agent(&mut self, id: &str) -> StoreResult<()> {
        self.core.begin();
        let Some(pos) = self.position(id) else {
            return self
                .core
                .settle(Err(StoreError::validation(format!("Unknown agent: {id}"))));
        };
        let snapshot = self.agents.remove(pos);

        let result = match self.api.delete_agent(id).await {
            Ok(()) => {
                self.events.publish(StoreEvent::AgentRemoved {
                    agent_id: id.to_string(),
                });
                Ok(())
            }
            Err(err) => {
                tracing::warn!(agent = %id, "rolling back optimistic removal: {err}");
                let at = pos.min(self.agents.len());
                self.agents.insert(at, snapshot);
                Err(StoreError::mutation(MutationKind::Delete, err.to_string()))
            }
        };
        self.core.settle(result)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.agents.iter().position(|a| a.id == id)
    }

    fn begin_fetch(&mut self) -> u64 {
        self.fetch_epoch += 1;
        self.fetch_epoch
    }

    fn finish_fetch(&mut self, token: u64, agents: Vec<Agent>) -> bool {
        if token != self.fetch_epoch {
            tracing::debug!(token, current = self.fetch_epoch, "discarding stale agent fetch");
            return false;
        }
        self.agents = agents;
        true
    }
}

#[async_trait]
impl Pollable for AgentStore {
    async fn poll_refresh(&mut self) -> StoreResult<()> {
        let token = self.begin_fetch();
        match self.api.list_agents().await {
            Ok(agents) => {
                self.finish_fetch(token, agents);
                self.polling_error = None;
                Ok(())
            }
            Err(err) => Err(StoreError::polling(err.to_string())),
        }
    }

    fn record_poll_failure(&mut self, message: String) {
        self.polling_error = Some(message);
    }
}
