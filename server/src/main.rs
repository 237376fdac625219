use anyhow::{Context, Result};
use dotenv::dotenv;
use poem::{listener::TcpListener, Server};
use tracing::info;

pub mod utils;

mod api;
mod config;
mod directory;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cfg = config::get();

    tracing_subscriber::fmt()
        .with_max_level(cfg.debug.log)
        .with_target(false)
        .init();

    let directory = directory::Directory::load(&cfg.data);

    info!("Listening on {}:{}", cfg.api.address, cfg.api.port);
    Server::new(TcpListener::bind((cfg.api.address, cfg.api.port)))
        .run(api::routes(directory))
        .await
        .context("server start")
}
