use std::collections::HashSet;

use serde::Serialize;

use super::domain::{
    VacancyRecord, FOOTER_DESCRIPTION_MAX_CHARS, JOB_TITLE_MAX_CHARS, MAX_CUSTOM_PILLS,
    PILL_MAX_CHARS,
};

/// Field limit the form enforces on a vacancy record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VacancyValidationError {
    #[error("job title must be at most {max} characters (got {actual})")]
    JobTitleTooLong { max: usize, actual: usize },
    #[error("footer description must be at most {max} characters (got {actual})")]
    FooterTooLong { max: usize, actual: usize },
    #[error("at most {max} custom pills are allowed (got {actual})")]
    TooManyPills { max: usize, actual: usize },
    #[error("custom pill '{0}' appears more than once")]
    DuplicatePill(String),
    #[error("custom pills must be non-empty and trimmed")]
    BlankPill,
    #[error("custom pill must be at most {max} characters (got {actual})")]
    PillTooLong { max: usize, actual: usize },
}

/// Fields the form requires before an image can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    JobTitle,
    Location,
}

impl RequiredField {
    pub const fn label(self) -> &'static str {
        match self {
            RequiredField::JobTitle => "Job Title",
            RequiredField::Location => "Location",
        }
    }
}

impl VacancyRecord {
    pub fn validate(&self) -> Result<(), VacancyValidationError> {
        let title_chars = self.job_title.chars().count();
        if title_chars > JOB_TITLE_MAX_CHARS {
            return Err(VacancyValidationError::JobTitleTooLong {
                max: JOB_TITLE_MAX_CHARS,
                actual: title_chars,
            });
        }

        let footer_chars = self.footer().chars().count();
        if footer_chars > FOOTER_DESCRIPTION_MAX_CHARS {
            return Err(VacancyValidationError::FooterTooLong {
                max: FOOTER_DESCRIPTION_MAX_CHARS,
                actual: footer_chars,
            });
        }

        if self.custom_pills.len() > MAX_CUSTOM_PILLS {
            return Err(VacancyValidationError::TooManyPills {
                max: MAX_CUSTOM_PILLS,
                actual: self.custom_pills.len(),
            });
        }

        let mut seen = HashSet::new();
        for pill in &self.custom_pills {
            if pill.is_empty() || pill.trim() != pill {
                return Err(VacancyValidationError::BlankPill);
            }
            let chars = pill.chars().count();
            if chars > PILL_MAX_CHARS {
                return Err(VacancyValidationError::PillTooLong {
                    max: PILL_MAX_CHARS,
                    actual: chars,
                });
            }
            if !seen.insert(pill.as_str()) {
                return Err(VacancyValidationError::DuplicatePill(pill.clone()));
            }
        }

        Ok(())
    }

    pub fn missing_required_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.job_title.trim().is_empty() {
            missing.push(RequiredField::JobTitle);
        }
        if self.location.trim().is_empty() {
            missing.push(RequiredField::Location);
        }
        missing
    }

    /// Whether the record carries enough detail to export a graphic.
    pub fn is_publishable(&self) -> bool {
        self.missing_required_fields().is_empty()
    }
}
