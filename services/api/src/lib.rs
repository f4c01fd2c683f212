mod classify;
mod cli;
mod infra;
mod routes;
mod server;

use self_screener::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
