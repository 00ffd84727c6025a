pub mod domain;
pub mod export;
pub mod pills;
pub mod templates;
pub mod validation;

pub use domain::{ColorScheme, EmploymentType, Urgency, VacancyRecord};
pub use export::{export_file_name, export_png, ExportError, ExportPlan, ExportSpec, Rasterizer};
pub use pills::PillRejection;
pub use validation::{RequiredField, VacancyValidationError};
