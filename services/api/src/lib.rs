mod admin;
mod cli;
mod infra;
mod routes;
mod server;

use genai_maturity::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
