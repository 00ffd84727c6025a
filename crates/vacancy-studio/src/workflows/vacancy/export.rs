use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::VacancyRecord;
use super::validation::RequiredField;

const FILE_PREFIX: &str = "quest-medical-hiring";
const FALLBACK_SLUG: &str = "vacancy";

/// Output geometry handed to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportSpec {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: u32,
}

impl ExportSpec {
    pub const SOCIAL_SQUARE: ExportSpec = ExportSpec {
        width: 1080,
        height: 1080,
        pixel_ratio: 2,
    };
}

impl Default for ExportSpec {
    fn default() -> Self {
        Self::SOCIAL_SQUARE
    }
}

/// Everything the export trigger needs to know about the current record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportPlan {
    pub file_name: String,
    #[serde(flatten)]
    pub spec: ExportSpec,
    pub publishable: bool,
    pub missing_fields: Vec<RequiredField>,
}

impl ExportPlan {
    pub fn for_record(record: &VacancyRecord, today: NaiveDate) -> Self {
        let missing_fields = record.missing_required_fields();
        Self {
            file_name: export_file_name(&record.job_title, today),
            spec: ExportSpec::SOCIAL_SQUARE,
            publishable: missing_fields.is_empty(),
            missing_fields,
        }
    }
}

/// Turns a rendered vacancy into PNG bytes. Implemented outside this crate.
pub trait Rasterizer: Debug {
    fn rasterize(&self, record: &VacancyRecord, spec: &ExportSpec) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("vacancy is missing required fields: {}", describe_missing(.missing))]
    Incomplete { missing: Vec<RequiredField> },
    #[error("failed to generate image: {0}")]
    Rasterize(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn describe_missing(missing: &[RequiredField]) -> String {
    missing
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `quest-medical-hiring-<title slug>-<YYYY-MM-DD>.png`
pub fn export_file_name(job_title: &str, date: NaiveDate) -> String {
    let slug = slugify(job_title);
    let slug = if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    };
    format!("{FILE_PREFIX}-{slug}-{}.png", date.format("%Y-%m-%d"))
}

fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for c in raw.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Rasterize `record` and write the PNG into `output_dir`, returning the written path.
pub fn export_png(
    rasterizer: &dyn Rasterizer,
    record: &VacancyRecord,
    output_dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let plan = ExportPlan::for_record(record, today);
    if !plan.publishable {
        return Err(ExportError::Incomplete {
            missing: plan.missing_fields,
        });
    }

    let bytes = rasterizer.rasterize(record, &plan.spec).map_err(|err| {
        warn!(error = %err, "rasterizer failed");
        err
    })?;

    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(&plan.file_name);
    fs::write(&path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "vacancy image exported");
    Ok(path)
}
