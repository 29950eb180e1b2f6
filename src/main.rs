pub(crate) mod ai;
pub(crate) mod classify;
mod cli;
mod error;
mod logging;
mod server;
pub(crate) mod tabs;

pub(crate) use error::{AppError, AppResult};

use std::time::Duration;

use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> AppResult<()> {
    logging::setup_logger();
    let cli = cli::Cli::parse();

    let client = ai::get_model_client(
        &cli.model_server,
        Duration::from_secs(cli.model_timeout_secs),
    )?;
    let state = server::AppState::new(client, &cli);

    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    info!("Chronicle listening on http://{}", listener.local_addr()?);
    axum::serve(listener, server::router(state)).await?;
    Ok(())
}
