//! Named vacancy templates: a bounded list of record snapshots persisted under
//! one key of a host key-value substrate, plus the editing session and HTTP
//! routes built on top of it.

pub mod domain;
pub mod editor;
pub mod ids;
pub mod router;
pub mod store;
pub mod substrate;

#[cfg(test)]
mod tests;

pub use domain::{validate_template_name, SavedTemplate, TemplateId, TemplateNameError};
pub use editor::{EditorError, VacancyEditor};
pub use ids::{
    Clock, FixedClock, SequentialIdGenerator, SystemClock, TemplateIdGenerator,
    TimestampIdGenerator,
};
pub use router::{shared_editor, template_router, SharedEditor};
pub use store::{TemplateStore, TemplateStoreError, DEFAULT_STORAGE_KEY, MAX_TEMPLATES};
pub use substrate::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, SubstrateError};
