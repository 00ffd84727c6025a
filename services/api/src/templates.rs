use crate::infra::{file_editor, parse_date};
use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use vacancy_studio::config::AppConfig;
use vacancy_studio::error::AppError;
use vacancy_studio::workflows::vacancy::templates::{TemplateId, MAX_TEMPLATES};
use vacancy_studio::workflows::vacancy::{EmploymentType, ExportPlan, VacancyRecord};

#[derive(Subcommand, Debug)]
pub(crate) enum TemplateCommand {
    /// List saved templates in save order
    List,
    /// Print one saved template as JSON
    Show {
        /// Template id as printed by `list`
        id: String,
    },
    /// Save a vacancy record as a new template
    Save(SaveArgs),
    /// Delete a saved template (unknown ids are ignored)
    Delete {
        /// Template id as printed by `list`
        id: String,
    },
    /// Show the image export plan for a saved template
    ExportPlan {
        /// Template id as printed by `list`
        id: String,
        /// Date stamped into the file name (defaults to today in UTC)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct SaveArgs {
    /// Template label (at most 50 characters)
    pub(crate) name: String,
    /// JSON file holding a full vacancy record; defaults are used otherwise
    #[arg(long)]
    pub(crate) record: Option<PathBuf>,
    /// Job title
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// Location
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Salary or wage range
    #[arg(long)]
    pub(crate) salary: Option<String>,
    /// Full-time, Part-time, Contract or Temporary
    #[arg(long)]
    pub(crate) employment_type: Option<EmploymentType>,
    /// Custom pill; repeat for several
    #[arg(long = "pill")]
    pub(crate) pills: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ListedTemplate<'a> {
    id: &'a str,
    name: &'a str,
    summary: String,
    created_at: &'a str,
}

pub(crate) fn run(config: &AppConfig, command: TemplateCommand) -> Result<(), AppError> {
    let mut editor = file_editor(&config.templates);
    debug!(dir = %config.templates.data_dir.display(), "using file template store");

    match command {
        TemplateCommand::List => {
            let templates = editor.templates();
            let listed: Vec<ListedTemplate<'_>> = templates
                .iter()
                .map(|template| ListedTemplate {
                    id: template.id.as_str(),
                    name: &template.name,
                    summary: template.summary(),
                    created_at: &template.created_at,
                })
                .collect();
            print_json(&listed)?;
            eprintln!(
                "Maximum {MAX_TEMPLATES} templates • {} remaining",
                editor.remaining_slots()
            );
        }
        TemplateCommand::Show { id } => {
            let id = TemplateId(id);
            let template = editor
                .store()
                .get(&id)
                .ok_or(AppError::TemplateNotFound(id))?;
            print_json(&template)?;
        }
        TemplateCommand::Save(args) => {
            let record = record_from_args(args.record.as_ref(), &args)?;
            let saved = editor.save_record(&args.name, &record)?;
            print_json(&saved)?;
        }
        TemplateCommand::Delete { id } => {
            editor.delete_template(&TemplateId(id));
            eprintln!("Template deleted");
        }
        TemplateCommand::ExportPlan { id, today } => {
            let id = TemplateId(id);
            if !editor.load_template(&id) {
                return Err(AppError::TemplateNotFound(id));
            }
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            let plan: ExportPlan = editor.export_plan(today);
            print_json(&plan)?;
        }
    }

    Ok(())
}

pub(crate) fn record_from_args(
    path: Option<&PathBuf>,
    args: &SaveArgs,
) -> Result<VacancyRecord, AppError> {
    let mut record = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str::<VacancyRecord>(&raw)?
        }
        None => VacancyRecord::default(),
    };

    if let Some(title) = &args.title {
        record.job_title = title.clone();
    }
    if let Some(location) = &args.location {
        record.location = location.clone();
    }
    if let Some(salary) = &args.salary {
        record.salary = salary.clone();
    }
    if let Some(employment_type) = args.employment_type {
        record.employment_type = employment_type;
    }
    for pill in &args.pills {
        record
            .add_pill(pill)
            .map_err(|err| AppError::Template(err.into()))?;
    }

    Ok(record)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vacancy_studio::workflows::vacancy::templates::EditorError;
    use vacancy_studio::workflows::vacancy::PillRejection;

    #[test]
    fn flags_override_defaults() {
        let args = SaveArgs {
            name: "Engineer".to_string(),
            title: Some("Field Engineer".to_string()),
            location: Some("Bristol".to_string()),
            employment_type: Some(EmploymentType::Contract),
            pills: vec![" Company Van ".to_string()],
            ..SaveArgs::default()
        };

        let record = record_from_args(None, &args).expect("record builds");
        assert_eq!(record.job_title, "Field Engineer");
        assert_eq!(record.location, "Bristol");
        assert_eq!(record.employment_type, EmploymentType::Contract);
        assert_eq!(record.custom_pills, vec!["Company Van".to_string()]);
        assert_eq!(record.phone, VacancyRecord::default().phone);
    }

    #[test]
    fn duplicate_pill_flags_are_rejected() {
        let args = SaveArgs {
            name: "Engineer".to_string(),
            pills: vec!["Days".to_string(), "Days".to_string()],
            ..SaveArgs::default()
        };

        match record_from_args(None, &args) {
            Err(AppError::Template(EditorError::Pill(PillRejection::Duplicate(pill)))) => {
                assert_eq!(pill, "Days")
            }
            other => panic!("expected duplicate pill error, got {other:?}"),
        }
    }
}
