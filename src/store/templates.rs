//! Template Store
//!
//! Slim store: templates are fetched, created, and removed, but not edited
//! in place.

use std::sync::Arc;

use crate::api::TemplateApi;
use crate::models::{NewTemplate, Template};
use crate::store::core::StoreCore;
use crate::utils::error::{MutationKind, StoreError, StoreResult};

pub struct TemplateStore {
    core: StoreCore,
    templates: Vec<Template>,
    api: Arc<dyn TemplateApi>,
}

impl TemplateStore {
    pub fn new(api: Arc<dyn TemplateApi>) -> Self {
        Self {
            core: StoreCore::new(),
            templates: Vec::new(),
            api,
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
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

    pub async fn fetch_templates(&mut self) -> StoreResult<()> {
        self.core.begin();
        let result = match self.api.list_templates().await {
            Ok(templates) => {
                self.templates = templates;
                Ok(())
            }
            Err(err) => Err(StoreError::fetch(err.to_string())),
        };
        self.core.settle(result)
    }

    pub async fn add_template(&mut self, new: NewTemplate) -> StoreResult<Template> {
        self.core.begin();
        if new.name.trim().is_empty() {
            return self.core.settle(Err(StoreError::validation(
                "Template name must not be empty",
            )));
        }
        let result = match self.api.create_template(&new).await {
            Ok(template) => {
                match self.templates.iter().position(|t| t.id == template.id) {
                    Some(pos) => self.templates[pos] = template.clone(),
                    None => self.templates.insert(0, template.clone()),
                }
                Ok(template)
            }
            Err(err) => Err(StoreError::mutation(MutationKind::Create, err.to_string())),
        };
        self.core.settle(result)
    }

    pub async fn remove_template(&mut self, id: &str) -> StoreResult<()> {
        self.core.begin();
        let Some(pos) = self.templates.iter().position(|t| t.id == id) else {
            return self
                .core
                .settle(Err(StoreError::validation(format!("Unknown template: {id}"))));
        };
        let snapshot = self.templates.remove(pos);

        let result = match self.api.delete_template(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(template = %id, "rolling back optimistic removal: {err}");
                let at = pos.min(self.templates.len());
                self.templates.insert(at, snapshot);
                Err(StoreError::mutation(MutationKind::Delete, err.to_string()))
            }
        };
        self.core.settle(result)
    }
}
