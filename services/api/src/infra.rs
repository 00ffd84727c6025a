use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use vacancy_studio::config::TemplateStoreConfig;
use vacancy_studio::workflows::vacancy::templates::{
    FileKeyValueStore, InMemoryKeyValueStore, TemplateStore, VacancyEditor,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Editor persisting templates as one JSON file under the configured directory.
pub(crate) fn file_editor(config: &TemplateStoreConfig) -> VacancyEditor<FileKeyValueStore> {
    let substrate = Arc::new(FileKeyValueStore::new(config.data_dir.clone()));
    VacancyEditor::new(TemplateStore::new(substrate).with_key(config.storage_key.clone()))
}

/// Editor whose templates vanish with the process.
pub(crate) fn memory_editor(storage_key: &str) -> VacancyEditor<InMemoryKeyValueStore> {
    let substrate = Arc::new(InMemoryKeyValueStore::new());
    VacancyEditor::new(TemplateStore::new(substrate).with_key(storage_key))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use vacancy_studio::workflows::vacancy::VacancyRecord;

    #[test]
    fn parse_date_trims_and_reports_input() {
        assert_eq!(
            parse_date(" 2025-10-18 "),
            Ok(NaiveDate::from_ymd_opt(2025, 10, 18).expect("valid date"))
        );
        let err = parse_date("18/10/2025").expect_err("wrong format");
        assert!(err.contains("18/10/2025"));
    }

    #[test]
    fn file_editor_uses_configured_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = TemplateStoreConfig {
            data_dir: PathBuf::from(dir.path()),
            storage_key: "clinic-templates".to_string(),
        };

        let editor = file_editor(&config);
        assert_eq!(editor.store().key(), "clinic-templates");
        editor
            .save_record("Default", &VacancyRecord::default())
            .expect("saved");
        assert!(dir.path().join("clinic-templates.json").exists());
    }

    #[test]
    fn memory_editor_starts_empty() {
        let editor = memory_editor("quest-medical-templates");
        assert!(editor.templates().is_empty());
        assert_eq!(editor.remaining_slots(), 5);
    }
}
