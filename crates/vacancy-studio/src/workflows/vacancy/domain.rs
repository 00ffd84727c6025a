use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const JOB_TITLE_MAX_CHARS: usize = 80;
pub const FOOTER_DESCRIPTION_MAX_CHARS: usize = 160;
pub const MAX_CUSTOM_PILLS: usize = 5;
pub const PILL_MAX_CHARS: usize = 50;

pub const DEFAULT_PHONE: &str = "07749 490 058";
pub const DEFAULT_EMAIL: &str = "Paula.rola@questmedical.biz";
pub const DEFAULT_WEBSITE: &str = "www.Questmedical.biz";
pub const DEFAULT_COMPASS_OPACITY: f64 = 5.0;

/// Complete description of one job posting, driving both the form and the rendered graphic.
///
/// Field names serialize in camelCase so previously persisted template blobs load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacancyRecord {
    pub job_title: String,
    pub salary: String,
    pub employment_type: EmploymentType,
    pub location: String,
    /// Carried for data compatibility; rendering does not read it.
    #[serde(default)]
    pub urgency: Urgency,
    pub phone: String,
    pub email: String,
    pub website: String,
    /// Carried for data compatibility; rendering uses a fixed opacity.
    #[serde(default = "default_compass_opacity")]
    pub compass_opacity: f64,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default)]
    pub custom_pills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_employment_type: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_location: Option<bool>,
}

fn default_compass_opacity() -> f64 {
    DEFAULT_COMPASS_OPACITY
}

impl Default for VacancyRecord {
    fn default() -> Self {
        Self {
            job_title: String::new(),
            salary: String::new(),
            employment_type: EmploymentType::FullTime,
            location: String::new(),
            urgency: Urgency::None,
            phone: DEFAULT_PHONE.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            website: DEFAULT_WEBSITE.to_string(),
            compass_opacity: DEFAULT_COMPASS_OPACITY,
            color_scheme: ColorScheme::White,
            custom_pills: Vec::new(),
            footer_description: Some(String::new()),
            hide_employment_type: Some(false),
            hide_location: Some(false),
        }
    }
}

impl VacancyRecord {
    pub fn hides_employment_type(&self) -> bool {
        self.hide_employment_type.unwrap_or(false)
    }

    pub fn hides_location(&self) -> bool {
        self.hide_location.unwrap_or(false)
    }

    pub fn footer(&self) -> &str {
        self.footer_description.as_deref().unwrap_or_default()
    }

    /// Title shown in template listings.
    pub fn display_title(&self) -> &str {
        if self.job_title.is_empty() {
            "Untitled"
        } else {
            &self.job_title
        }
    }

    /// Location shown in template listings.
    pub fn display_location(&self) -> &str {
        if self.location.is_empty() {
            "No location"
        } else {
            &self.location
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Temporary")]
    Temporary,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Temporary,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Temporary => "Temporary",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employment type '{0}' (expected Full-time, Part-time, Contract or Temporary)")]
pub struct UnknownEmploymentType(pub String);

impl FromStr for EmploymentType {
    type Err = UnknownEmploymentType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "full-time" | "fulltime" => Ok(EmploymentType::FullTime),
            "part-time" | "parttime" => Ok(EmploymentType::PartTime),
            "contract" => Ok(EmploymentType::Contract),
            "temporary" | "temp" => Ok(EmploymentType::Temporary),
            _ => Err(UnknownEmploymentType(value.to_string())),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    None,
    Immediate,
    Urgent,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// White text on the brand blue background.
    #[default]
    White,
    /// Brand blue text on a white background.
    Blue,
}
