//! Mandate Store

use std::sync::Arc;

use crate::api::MandateApi;
use crate::models::{Mandate, MandatePatch, NewMandate};
use crate::store::core::StoreCore;
use crate::utils::error::{MutationKind, StoreError, StoreResult};

/// Store for standing agent directives; follows the shared optimistic
/// discipline.
pub struct MandateStore {
    core: StoreCore,
    mandates: Vec<Mandate>,
    api: Arc<dyn MandateApi>,
}

impl MandateStore {
    pub fn new(api: Arc<dyn MandateApi>) -> Self {
        Self {
            core: StoreCore::new(),
            mandates: Vec::new(),
            api,
        }
    }

    pub fn mandates(&self) -> &[Mandate] {
        &self.mandates
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

    pub async fn fetch_mandates(&mut self) -> StoreResult<()> {
        self.core.begin();
        let result = match self.api.list_mandates().await {
            Ok(mandates) => {
                self.mandates = mandates;
                Ok(())
            }
            Err(err) => Err(StoreError::fetch(err.to_string())),
        };
        self.core.settle(result)
    }

    pub async fn add_mandate(&mut self, new: NewMandate) -> StoreResult<Mandate> {
        self.core.begin();
        if new.title.trim().is_empty() {
            return self.core.settle(Err(StoreError::validation(
                "Mandate title must not be empty",
            )));
        }
        let result = match self.api.create_mandate(&new).await {
            Ok(mandate) => {
                match self.position(&mandate.id) {
                    Some(pos) => self.mandates[pos] = mandate.clone(),
                    None => self.mandates.insert(0, mandate.clone()),
                }
                Ok(mandate)
            }
            Err(err) => Err(StoreError::mutation(MutationKind::Create, err.to_string())),
        };
        self.core.settle(result)
    }

    pub async fn edit_mandate(&mut self, id: &str, patch: MandatePatch) -> StoreResult<Mandate> {
        self.core.begin();
        let Some(pos) = self.position(id) else {
            return self
                .core
                .settle(Err(StoreError::validation(format!("Unknown mandate: {id}"))));
        };
        let snapshot = self.mandates[pos].clone();
        patch.apply(&mut self.mandates[pos]);

        let result = match self.api.update_mandate(id, &patch).await {
            Ok(confirmed) => {
                if let Some(pos) = self.position(id) {
                    self.mandates[pos] = confirmed.clone();
                }
                Ok(confirmed)
            }
            Err(err) => {
                tracing::warn!(mandate = %id, "rolling back optimistic edit: {err}");
                if let Some(pos) = self.position(id) {
                    self.mandates[pos] = snapshot;
                }
                Err(StoreError::mutation(MutationKind::Update, err.to_string()))
            }
        };
        self.core.settle(result)
    }

    pub async fn remove_mandate(&mut self, id: &str) -> StoreResult<()> {
        self.core.begin();
        let Some(pos) = self.position(id) else {
            return self
                .core
                .settle(Err(StoreError::validation(format!("Unknown mandate: {id}"))));
        };
        let snapshot = self.mandates.remove(pos);

        let result = match self.api.delete_mandate(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(mandate = %id, "rolling back optimistic removal: {err}");
                let at = pos.min(self.mandates.len());
                self.mandates.insert(at, snapshot);
                Err(StoreError::mutation(MutationKind::Delete, err.to_string()))
            }
        };
        self.core.settle(result)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.mandates.iter().position(|m| m.id == id)
    }
}
