use std::fmt;

use serde::{Deserialize, Serialize};

use crate::workflows::vacancy::domain::VacancyRecord;

pub const TEMPLATE_NAME_MAX_CHARS: usize = 50;

/// Identifier wrapper for saved templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Named, timestamped snapshot of a vacancy record. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTemplate {
    pub id: TemplateId,
    pub name: String,
    pub data: VacancyRecord,
    /// ISO-8601 UTC timestamp, e.g. `2025-10-01T09:30:00.000Z`.
    pub created_at: String,
}

impl SavedTemplate {
    /// One-line description used in template pickers.
    pub fn summary(&self) -> String {
        format!(
            "{} • {}",
            self.data.display_title(),
            self.data.display_location()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateNameError {
    #[error("Please enter a template name")]
    Blank,
    #[error("template name must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Checks a user-supplied template label. The label is stored exactly as given.
pub fn validate_template_name(name: &str) -> Result<(), TemplateNameError> {
    if name.trim().is_empty() {
        return Err(TemplateNameError::Blank);
    }
    let actual = name.chars().count();
    if actual > TEMPLATE_NAME_MAX_CHARS {
        return Err(TemplateNameError::TooLong {
            max: TEMPLATE_NAME_MAX_CHARS,
            actual,
        });
    }
    Ok(())
}
