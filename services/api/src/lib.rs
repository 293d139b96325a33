mod cli;
mod infra;
mod report;
mod routes;
mod server;

use nutri::error::AppError;

pub use routes::nutriscore_router;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
