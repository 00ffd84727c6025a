use super::common::*;
use chrono::NaiveDate;

use crate::workflows::vacancy::domain::VacancyRecord;
use crate::workflows::vacancy::pills::PillRejection;
use crate::workflows::vacancy::templates::{
    EditorError, TemplateId, TemplateNameError, TemplateStoreError,
};
use crate::workflows::vacancy::validation::VacancyValidationError;

#[test]
fn editor_starts_from_default_record() {
    let (_, editor) = memory_editor();
    assert_eq!(editor.draft(), &VacancyRecord::default());
    assert!(editor.templates().is_empty());
}

#[test]
fn reset_restores_defaults() {
    let (_, mut editor) = memory_editor();
    editor.replace_draft(engineer()).expect("valid record");
    editor.reset();
    assert_eq!(editor.draft(), &VacancyRecord::default());
}

#[test]
fn save_as_rejects_blank_names() {
    let (substrate, mut editor) = memory_editor();
    editor.replace_draft(engineer()).expect("valid record");

    match editor.save_as("   ") {
        Err(EditorError::InvalidName(TemplateNameError::Blank)) => {}
        other => panic!("expected blank name error, got {other:?}"),
    }
    assert!(raw_blob(substrate.as_ref()).is_none());
}

#[test]
fn save_as_rejects_long_names() {
    let (_, editor) = memory_editor();
    let name = "n".repeat(51);
    assert!(matches!(
        editor.save_as(&name),
        Err(EditorError::InvalidName(TemplateNameError::TooLong { actual: 51, .. }))
    ));
}

#[test]
fn save_as_keeps_name_verbatim() {
    let (_, mut editor) = memory_editor();
    editor.replace_draft(engineer()).expect("valid record");
    let saved = editor.save_as(" Engineer ").expect("saved");
    assert_eq!(saved.name, " Engineer ");
    assert_eq!(saved.data, engineer());
}

#[test]
fn save_as_reports_capacity() {
    let (_, editor) = memory_editor();
    for name in ["A", "B", "C", "D", "E"] {
        editor.save_as(name).expect("within capacity");
    }
    assert_eq!(editor.remaining_slots(), 0);
    assert!(matches!(
        editor.save_as("F"),
        Err(EditorError::Store(TemplateStoreError::CapacityExceeded { .. }))
    ));
}

#[test]
fn load_template_copies_into_draft() {
    let (_, mut editor) = memory_editor();
    let saved = editor
        .save_record("Engineer", &engineer())
        .expect("saved");

    assert!(editor.load_template(&saved.id));
    assert_eq!(editor.draft(), &engineer());

    editor.add_pill("Nights").expect("pill added");
    assert_eq!(editor.store().load(&saved.id), Some(engineer()));
}

#[test]
fn load_unknown_template_keeps_draft() {
    let (_, mut editor) = memory_editor();
    editor.replace_draft(engineer()).expect("valid record");
    assert!(!editor.load_template(&TemplateId::from("missing")));
    assert_eq!(editor.draft(), &engineer());
}

#[test]
fn replace_draft_rejects_invalid_records() {
    let (_, mut editor) = memory_editor();
    let mut record = engineer();
    record.job_title = "x".repeat(81);

    assert!(matches!(
        editor.replace_draft(record),
        Err(EditorError::InvalidRecord(VacancyValidationError::JobTitleTooLong { .. }))
    ));
    assert_eq!(editor.draft(), &VacancyRecord::default());
}

#[test]
fn pill_rejections_leave_draft_unchanged() {
    let (_, mut editor) = memory_editor();
    for pill in ["A", "B", "C", "D", "E"] {
        editor.add_pill(pill).expect("pill added");
    }
    let before = editor.draft().custom_pills.clone();

    assert!(matches!(
        editor.add_pill("F"),
        Err(EditorError::Pill(PillRejection::Full))
    ));
    assert!(matches!(
        editor.add_pill("A"),
        Err(EditorError::Pill(PillRejection::Duplicate(_)))
    ));
    assert!(matches!(
        editor.add_pill(" "),
        Err(EditorError::Pill(PillRejection::Empty))
    ));
    assert_eq!(editor.draft().custom_pills, before);

    assert!(editor.remove_pill("C"));
    assert_eq!(editor.draft().custom_pills, vec!["A", "B", "D", "E"]);
}

#[test]
fn delete_template_goes_through_store() {
    let (_, editor) = memory_editor();
    let saved = editor.save_as("A").expect("saved");
    editor.delete_template(&saved.id);
    assert!(editor.templates().is_empty());
    assert_eq!(editor.remaining_slots(), 5);
}

#[test]
fn export_plan_follows_draft() {
    let (_, mut editor) = memory_editor();
    let today = NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date");
    assert!(!editor.export_plan(today).publishable);

    editor.replace_draft(engineer()).expect("valid record");
    let plan = editor.export_plan(today);
    assert!(plan.publishable);
    assert_eq!(
        plan.file_name,
        "quest-medical-hiring-medical-equipment-engineer-2025-10-01.png"
    );
}
