use chrono::NaiveDate;
use tracing::debug;

use super::domain::{validate_template_name, SavedTemplate, TemplateId, TemplateNameError};
use super::store::{TemplateStore, TemplateStoreError};
use super::substrate::KeyValueStore;
use crate::workflows::vacancy::domain::VacancyRecord;
use crate::workflows::vacancy::export::ExportPlan;
use crate::workflows::vacancy::pills::PillRejection;
use crate::workflows::vacancy::validation::VacancyValidationError;

/// Live editing session: the working vacancy record plus the template store it
/// saves into and loads from.
#[derive(Debug)]
pub struct VacancyEditor<S> {
    store: TemplateStore<S>,
    draft: VacancyRecord,
}

impl<S> VacancyEditor<S>
where
    S: KeyValueStore,
{
    pub fn new(store: TemplateStore<S>) -> Self {
        Self {
            store,
            draft: VacancyRecord::default(),
        }
    }

    pub fn store(&self) -> &TemplateStore<S> {
        &self.store
    }

    pub fn draft(&self) -> &VacancyRecord {
        &self.draft
    }

    pub fn replace_draft(&mut self, record: VacancyRecord) -> Result<(), EditorError> {
        record.validate()?;
        self.draft = record;
        Ok(())
    }

    /// Discard the working record in favour of the defaults.
    pub fn reset(&mut self) {
        self.draft = VacancyRecord::default();
    }

    pub fn add_pill(&mut self, pill: &str) -> Result<(), EditorError> {
        self.draft.add_pill(pill)?;
        Ok(())
    }

    pub fn remove_pill(&mut self, pill: &str) -> bool {
        self.draft.remove_pill(pill)
    }

    pub fn save_as(&self, name: &str) -> Result<SavedTemplate, EditorError> {
        self.save_record(name, &self.draft)
    }

    /// Save an arbitrary record, applying the same checks as the form.
    pub fn save_record(
        &self,
        name: &str,
        record: &VacancyRecord,
    ) -> Result<SavedTemplate, EditorError> {
        validate_template_name(name)?;
        record.validate()?;
        Ok(self.store.save(name, record)?)
    }

    /// Copy the template's record into the draft. Unknown ids leave the draft as is.
    pub fn load_template(&mut self, id: &TemplateId) -> bool {
        match self.store.load(id) {
            Some(record) => {
                debug!(%id, "template loaded into draft");
                self.draft = record;
                true
            }
            None => false,
        }
    }

    pub fn delete_template(&self, id: &TemplateId) {
        self.store.delete(id);
    }

    pub fn templates(&self) -> Vec<SavedTemplate> {
        self.store.list()
    }

    pub fn remaining_slots(&self) -> usize {
        self.store.remaining()
    }

    pub fn export_plan(&self, today: NaiveDate) -> ExportPlan {
        ExportPlan::for_record(&self.draft, today)
    }
}

/// Error raised by the editing session.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    InvalidName(#[from] TemplateNameError),
    #[error(transparent)]
    InvalidRecord(#[from] VacancyValidationError),
    #[error(transparent)]
    Pill(#[from] PillRejection),
    #[error(transparent)]
    Store(#[from] TemplateStoreError),
}
