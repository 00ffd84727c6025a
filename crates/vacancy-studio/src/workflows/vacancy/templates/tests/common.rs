use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::vacancy::domain::{ColorScheme, EmploymentType, Urgency, VacancyRecord};
use crate::workflows::vacancy::templates::{
    shared_editor, template_router, FixedClock, InMemoryKeyValueStore, KeyValueStore,
    SequentialIdGenerator, SharedEditor, SubstrateError, TemplateStore, VacancyEditor,
    DEFAULT_STORAGE_KEY,
};

pub(super) fn created_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 30, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn engineer() -> VacancyRecord {
    VacancyRecord {
        job_title: "Medical Equipment Engineer".to_string(),
        salary: "£28,000 - £35,000".to_string(),
        employment_type: EmploymentType::FullTime,
        location: "Manchester, UK".to_string(),
        urgency: Urgency::Immediate,
        compass_opacity: 12.0,
        color_scheme: ColorScheme::Blue,
        custom_pills: vec!["Static Role".to_string(), "Company Van".to_string()],
        footer_description: Some("Join a growing team supporting hospitals.".to_string()),
        hide_location: Some(true),
        ..VacancyRecord::default()
    }
}

pub(super) fn record_titled(title: &str) -> VacancyRecord {
    VacancyRecord {
        job_title: title.to_string(),
        location: "Leeds".to_string(),
        ..VacancyRecord::default()
    }
}

pub(super) fn deterministic_store<S>(substrate: Arc<S>) -> TemplateStore<S>
where
    S: KeyValueStore,
{
    TemplateStore::new(substrate)
        .with_id_generator(SequentialIdGenerator::new())
        .with_clock(FixedClock(created_instant()))
}

pub(super) fn memory_store() -> (Arc<InMemoryKeyValueStore>, TemplateStore<InMemoryKeyValueStore>) {
    let substrate = Arc::new(InMemoryKeyValueStore::new());
    let store = deterministic_store(substrate.clone());
    (substrate, store)
}

pub(super) fn raw_blob<S: KeyValueStore>(substrate: &S) -> Option<String> {
    substrate.get(DEFAULT_STORAGE_KEY).expect("substrate readable")
}

/// Memory substrate that counts writes and can be told to reject them.
#[derive(Debug, Default)]
pub(super) struct RecordingSubstrate {
    inner: InMemoryKeyValueStore,
    writes: AtomicUsize,
    reject_writes: AtomicBool,
}

impl RecordingSubstrate {
    pub(super) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(super) fn reject_writes(&self) {
        self.reject_writes.store(true, Ordering::SeqCst);
    }
}

impl KeyValueStore for RecordingSubstrate {
    fn get(&self, key: &str) -> Result<Option<String>, SubstrateError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SubstrateError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(SubstrateError::Unavailable("quota exceeded".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }
}

pub(super) struct UnavailableSubstrate;

impl KeyValueStore for UnavailableSubstrate {
    fn get(&self, _key: &str) -> Result<Option<String>, SubstrateError> {
        Err(SubstrateError::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), SubstrateError> {
        Err(SubstrateError::Unavailable("storage disabled".to_string()))
    }
}

pub(super) fn memory_editor() -> (Arc<InMemoryKeyValueStore>, VacancyEditor<InMemoryKeyValueStore>) {
    let (substrate, store) = memory_store();
    (substrate, VacancyEditor::new(store))
}

pub(super) fn memory_router() -> (SharedEditor<InMemoryKeyValueStore>, axum::Router) {
    let (_, editor) = memory_editor();
    let editor = shared_editor(editor);
    let router = template_router(editor.clone());
    (editor, router)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
