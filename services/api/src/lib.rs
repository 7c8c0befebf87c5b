mod batch;
mod cli;
mod infra;
mod predict;
mod routes;
mod server;

use stress_lens::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
