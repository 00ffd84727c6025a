use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use super::domain::{SavedTemplate, TemplateId};
use super::ids::{iso_timestamp, Clock, SystemClock, TemplateIdGenerator, TimestampIdGenerator};
use super::substrate::{KeyValueStore, SubstrateError};
use crate::workflows::vacancy::domain::VacancyRecord;

pub const DEFAULT_STORAGE_KEY: &str = "quest-medical-templates";
pub const MAX_TEMPLATES: usize = 5;

/// Bounded, ordered collection of saved templates persisted as one JSON array
/// under a single substrate key.
///
/// Every operation re-reads the blob and every mutation rewrites it in full.
pub struct TemplateStore<S> {
    substrate: Arc<S>,
    key: String,
    ids: Box<dyn TemplateIdGenerator>,
    clock: Box<dyn Clock>,
}

impl<S> TemplateStore<S>
where
    S: KeyValueStore,
{
    pub fn new(substrate: Arc<S>) -> Self {
        Self {
            substrate,
            key: DEFAULT_STORAGE_KEY.to_string(),
            ids: Box::new(TimestampIdGenerator::new()),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_id_generator(mut self, ids: impl TemplateIdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn substrate(&self) -> &Arc<S> {
        &self.substrate
    }

    /// Saved templates in save order. Unreadable or corrupt data reads as empty;
    /// entries that no longer decode are skipped.
    pub fn list(&self) -> Vec<SavedTemplate> {
        self.entries()
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                match serde_json::from_value::<SavedTemplate>(entry) {
                    Ok(template) => Some(template),
                    Err(err) => {
                        warn!(key = %self.key, index, error = %err, "skipping undecodable template");
                        None
                    }
                }
            })
            .collect()
    }

    /// Append a snapshot of `data` under `name`.
    ///
    /// `name` is stored as given; callers validate it first. Undecodable
    /// entries already in the blob are written back untouched and count
    /// towards capacity.
    pub fn save(
        &self,
        name: &str,
        data: &VacancyRecord,
    ) -> Result<SavedTemplate, TemplateStoreError> {
        let mut entries = self.entries();
        if entries.len() >= MAX_TEMPLATES {
            debug!(count = entries.len(), "template save refused at capacity");
            return Err(TemplateStoreError::CapacityExceeded { max: MAX_TEMPLATES });
        }

        let template = SavedTemplate {
            id: self.ids.next_id(),
            name: name.to_string(),
            data: data.clone(),
            created_at: iso_timestamp(self.clock.now()),
        };
        entries.push(serde_json::to_value(&template)?);
        self.persist(&entries)?;

        debug!(id = %template.id, name = %template.name, count = entries.len(), "template saved");
        Ok(template)
    }

    /// Remove the template with `id`. Unknown ids leave storage untouched.
    pub fn delete(&self, id: &TemplateId) {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|entry| entry_id(entry) != Some(id.as_str()));
        if entries.len() == before {
            debug!(%id, "delete requested for unknown template");
            return;
        }

        match self.persist(&entries) {
            Ok(()) => debug!(%id, remaining = entries.len(), "template deleted"),
            Err(err) => error!(%id, error = %err, "failed to persist template deletion"),
        }
    }

    /// Copy of the record saved under `id`.
    pub fn load(&self, id: &TemplateId) -> Option<VacancyRecord> {
        self.get(id).map(|template| template.data)
    }

    pub fn get(&self, id: &TemplateId) -> Option<SavedTemplate> {
        self.list().into_iter().find(|template| &template.id == id)
    }

    pub fn remaining(&self) -> usize {
        MAX_TEMPLATES.saturating_sub(self.entries().len())
    }

    /// Raw array entries of the blob. Absent, unreadable or non-array data reads as empty.
    fn entries(&self) -> Vec<Value> {
        let raw = match self.substrate.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "template storage unavailable; treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!(key = %self.key, "template blob is not a list; treating as empty");
                Vec::new()
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "error loading templates; treating as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, entries: &[Value]) -> Result<(), TemplateStoreError> {
        let blob = serde_json::to_string(entries)?;
        self.substrate.set(&self.key, &blob)?;
        Ok(())
    }
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

impl<S> std::fmt::Debug for TemplateStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Error raised by the template store.
#[derive(Debug, thiserror::Error)]
pub enum TemplateStoreError {
    #[error("Maximum {max} templates allowed. Please delete one first.")]
    CapacityExceeded { max: usize },
    #[error("failed to persist templates: {0}")]
    Persistence(#[from] SubstrateError),
    #[error("failed to encode templates: {0}")]
    Encode(#[from] serde_json::Error),
}
