mod cli;
mod infra;
mod routes;
mod server;
mod templates;

use vacancy_studio::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
