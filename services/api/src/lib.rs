mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use market_scope::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
