mod cli;
mod infra;
mod pages;
mod routes;
mod server;

use pioneer_site::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
