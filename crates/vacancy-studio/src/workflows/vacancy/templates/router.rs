use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{SavedTemplate, TemplateId};
use super::editor::{EditorError, VacancyEditor};
use super::store::{TemplateStoreError, MAX_TEMPLATES};
use super::substrate::KeyValueStore;
use crate::workflows::vacancy::domain::VacancyRecord;

/// Editing session shared between request handlers. One lock guards the whole
/// read-modify-write cycle of the template blob.
pub type SharedEditor<S> = Arc<Mutex<VacancyEditor<S>>>;

pub fn shared_editor<S>(editor: VacancyEditor<S>) -> SharedEditor<S> {
    Arc::new(Mutex::new(editor))
}

#[derive(Debug, Deserialize)]
pub struct SaveTemplateRequest {
    pub name: String,
    /// Record to save; the current draft when omitted.
    #[serde(default)]
    pub data: Option<VacancyRecord>,
}

#[derive(Debug, Deserialize)]
pub struct AddPillRequest {
    pub pill: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateListEntry {
    #[serde(flatten)]
    pub template: SavedTemplate,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateCatalog {
    pub templates: Vec<TemplateListEntry>,
    pub remaining: usize,
    pub max: usize,
}

/// Router builder exposing the draft and template operations.
pub fn template_router<S>(editor: SharedEditor<S>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/templates",
            get(list_handler::<S>).post(save_handler::<S>),
        )
        .route(
            "/api/v1/templates/:template_id",
            get(show_handler::<S>).delete(delete_handler::<S>),
        )
        .route(
            "/api/v1/templates/:template_id/load",
            post(load_handler::<S>),
        )
        .route(
            "/api/v1/draft",
            get(draft_handler::<S>).put(replace_draft_handler::<S>),
        )
        .route("/api/v1/draft/reset", post(reset_handler::<S>))
        .route("/api/v1/draft/pills", post(add_pill_handler::<S>))
        .route("/api/v1/draft/pills/:pill", delete(remove_pill_handler::<S>))
        .route("/api/v1/draft/export", get(export_plan_handler::<S>))
        .with_state(editor)
}

fn lock<S>(editor: &SharedEditor<S>) -> MutexGuard<'_, VacancyEditor<S>> {
    editor.lock().unwrap_or_else(PoisonError::into_inner)
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn editor_error_response(error: EditorError) -> Response {
    let status = match &error {
        EditorError::InvalidName(_) | EditorError::InvalidRecord(_) | EditorError::Pill(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EditorError::Store(TemplateStoreError::CapacityExceeded { .. }) => StatusCode::CONFLICT,
        EditorError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error.to_string())
}

fn not_found(id: &TemplateId) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("template '{id}' not found"))
}

pub(crate) async fn list_handler<S>(State(editor): State<SharedEditor<S>>) -> Response
where
    S: KeyValueStore + 'static,
{
    let editor = lock(&editor);
    let templates: Vec<TemplateListEntry> = editor
        .templates()
        .into_iter()
        .map(|template| TemplateListEntry {
            summary: template.summary(),
            template,
        })
        .collect();
    let catalog = TemplateCatalog {
        remaining: editor.remaining_slots(),
        templates,
        max: MAX_TEMPLATES,
    };
    (StatusCode::OK, Json(catalog)).into_response()
}

pub(crate) async fn save_handler<S>(
    State(editor): State<SharedEditor<S>>,
    Json(request): Json<SaveTemplateRequest>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let editor = lock(&editor);
    let result = match &request.data {
        Some(record) => editor.save_record(&request.name, record),
        None => editor.save_as(&request.name),
    };
    match result {
        Ok(template) => (StatusCode::CREATED, Json(template)).into_response(),
        Err(error) => editor_error_response(error),
    }
}

pub(crate) async fn show_handler<S>(
    State(editor): State<SharedEditor<S>>,
    Path(template_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let id = TemplateId(template_id);
    match lock(&editor).store().get(&id) {
        Some(template) => (StatusCode::OK, Json(template)).into_response(),
        None => not_found(&id),
    }
}

pub(crate) async fn delete_handler<S>(
    State(editor): State<SharedEditor<S>>,
    Path(template_id): Path<String>,
) -> StatusCode
where
    S: KeyValueStore + 'static,
{
    lock(&editor).delete_template(&TemplateId(template_id));
    StatusCode::NO_CONTENT
}

pub(crate) async fn load_handler<S>(
    State(editor): State<SharedEditor<S>>,
    Path(template_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let id = TemplateId(template_id);
    let mut editor = lock(&editor);
    if editor.load_template(&id) {
        (StatusCode::OK, Json(editor.draft().clone())).into_response()
    } else {
        not_found(&id)
    }
}

pub(crate) async fn draft_handler<S>(State(editor): State<SharedEditor<S>>) -> Response
where
    S: KeyValueStore + 'static,
{
    let draft = lock(&editor).draft().clone();
    (StatusCode::OK, Json(draft)).into_response()
}

pub(crate) async fn replace_draft_handler<S>(
    State(editor): State<SharedEditor<S>>,
    Json(record): Json<VacancyRecord>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let mut editor = lock(&editor);
    match editor.replace_draft(record) {
        Ok(()) => (StatusCode::OK, Json(editor.draft().clone())).into_response(),
        Err(error) => editor_error_response(error),
    }
}

pub(crate) async fn reset_handler<S>(State(editor): State<SharedEditor<S>>) -> Response
where
    S: KeyValueStore + 'static,
{
    let mut editor = lock(&editor);
    editor.reset();
    (StatusCode::OK, Json(editor.draft().clone())).into_response()
}

pub(crate) async fn add_pill_handler<S>(
    State(editor): State<SharedEditor<S>>,
    Json(request): Json<AddPillRequest>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let mut editor = lock(&editor);
    match editor.add_pill(&request.pill) {
        Ok(()) => (StatusCode::OK, Json(editor.draft().clone())).into_response(),
        Err(error) => editor_error_response(error),
    }
}

pub(crate) async fn remove_pill_handler<S>(
    State(editor): State<SharedEditor<S>>,
    Path(pill): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let mut editor = lock(&editor);
    editor.remove_pill(&pill);
    (StatusCode::OK, Json(editor.draft().clone())).into_response()
}

pub(crate) async fn export_plan_handler<S>(State(editor): State<SharedEditor<S>>) -> Response
where
    S: KeyValueStore + 'static,
{
    let plan = lock(&editor).export_plan(Utc::now().date_naive());
    (StatusCode::OK, Json(plan)).into_response()
}
