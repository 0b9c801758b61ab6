mod app;
mod cli;
mod commands;
mod context;
mod listing;
mod permissions;
mod rest;
mod storage;
mod tracing;
mod types;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    crate::tracing::init();
    app::run().await
}
