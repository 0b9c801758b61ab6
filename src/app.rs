use crate::{cli, context, rest, storage};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The main application state.
/// decoupled from CLI parsing to allow for easier testing.
pub struct App {
    config: context::Context,
    storage: Arc<dyn storage::Storage + Send + Sync>,
    shutdown: CancellationToken,
}

impl App {
    /// Factory method to build the App from CLI arguments.
    /// Handles the side effects: log file setup and storage creation.
    pub fn from_cli() -> Result<(App, cli::Cli)> {
        let cli = crate::cli::parse();

        if let Err(err) = crate::tracing::set_log_file(cli.log_file.as_deref().map(Path::new)) {
            log::warn!("⚠️ Log file unavailable, logging to stderr only: {}", err);
        }

        let ctx = context::Context::from_cli(&cli);
        log_startup_info(&ctx);

        let storage = init_storage(&ctx)?;

        Ok((App::new(ctx, storage), cli))
    }

    /// Dependencies are injected here, making it easy to swap Storage for mocks.
    fn new(config: context::Context, storage: Arc<dyn storage::Storage + Send + Sync>) -> Self {
        Self {
            config,
            storage,
            shutdown: CancellationToken::new(),
        }
    }

    /// Main entry point for the Daemon.
    pub async fn run_daemon(&self) -> Result<()> {
        self.log_runtime_config();

        let mut rest_handle = self.spawn_rest_server();

        self.wait_for_shutdown(&mut rest_handle).await
    }

    // --- Helper Methods ---

    fn rest_state(&self) -> rest::AppState {
        rest::AppState {
            storage: self.storage.clone(),
            started_at: std::time::SystemTime::now(),
            listing: self.config.listing.clone(),
            admin: self.config.admin,
        }
    }

    fn spawn_rest_server(&self) -> JoinHandle<()> {
        let addr = self.config.api_listen;
        let state = self.rest_state();
        let token = self.shutdown.clone();

        tokio::spawn(async move {
            if let Err(e) = rest::serve(addr, state, token).await {
                log::error!("REST server failed: {:#}", e);
            }
        })
    }

    async fn wait_for_shutdown(&self, rest_task: &mut JoinHandle<()>) -> Result<()> {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => log::info!("🧨 Ctrl-C received, shutting down..."),
            _ = &mut *rest_task => log::error!("REST task exited unexpectedly"),
        }

        self.shutdown.cancel();

        // Polling a completed JoinHandle again panics.
        if !rest_task.is_finished() {
            let _ = rest_task.await;
        }

        log::info!("✅ Shutdown complete");
        Ok(())
    }

    fn log_runtime_config(&self) {
        log::info!("🌐 REST API: http://{}", self.config.api_listen);
        log::info!("🗂️ List type: {}", self.config.listing.mode);
        log::info!("📄 Page size: {}", self.config.listing.page_size);
        if let Some(path) = self.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.to_string_lossy());
        }
    }
}

// --- Standalone Helpers ---

fn log_startup_info(ctx: &context::Context) {
    log::info!("🚀 Starting repolist");
    log::info!("📂 Data dir: {}", ctx.data_dir.to_string_lossy());
}

fn init_storage(ctx: &context::Context) -> Result<Arc<dyn storage::Storage + Send + Sync>> {
    std::fs::create_dir_all(&ctx.data_dir)
        .with_context(|| format!("creating data dir {}", ctx.data_dir.display()))?;

    let sqlite = storage::SqliteStorage::new(ctx.db_path());
    if ctx.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;

    Ok(Arc::new(sqlite))
}

// --- Entry Point ---

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    // Handle one-shot commands
    if let Some(cmd) = &cli.cmd {
        return cmd.run(&app.config, app.storage.as_ref());
    }

    app.run_daemon().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListingSettings;
    use crate::permissions::AdminPolicy;
    use crate::storage::Storage;
    use crate::types::{DisplayMode, RepositoryRecord};
    use chrono::DateTime;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("repolist_app_{}", nanos))
    }

    fn context(data_dir: PathBuf, reset: bool) -> context::Context {
        context::Context {
            data_dir,
            reset,
            log_file: None,
            api_listen: "127.0.0.1:0".parse().unwrap(),
            listing: ListingSettings {
                mode: DisplayMode::Flat,
                root_group_name: " ".to_string(),
                page_size: 10,
            },
            admin: AdminPolicy {
                allow_administration: false,
                authenticate_admin_pages: true,
            },
        }
    }

    #[test]
    fn init_storage_creates_data_dir_and_database() {
        let dir = unique_temp_dir().join("nested");
        let ctx = context(dir.clone(), false);
        let storage = init_storage(&ctx).unwrap();
        assert!(ctx.db_path().exists());
        assert!(storage.list_repositories().unwrap().is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn init_storage_reset_discards_catalog() {
        let dir = unique_temp_dir();
        let ctx = context(dir.clone(), false);
        let storage = init_storage(&ctx).unwrap();
        storage
            .save_repository(&RepositoryRecord::new(
                "a.git",
                DateTime::from_timestamp(1, 0).unwrap(),
            ))
            .unwrap();

        let kept = init_storage(&ctx).unwrap();
        assert_eq!(kept.list_repositories().unwrap().len(), 1);

        let reset = init_storage(&context(dir.clone(), true)).unwrap();
        assert!(reset.list_repositories().unwrap().is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn rest_server_stops_on_shutdown() {
        let dir = unique_temp_dir();
        let ctx = context(dir.clone(), false);
        let storage = init_storage(&ctx).unwrap();
        let app = App::new(ctx, storage);

        let handle = app.spawn_rest_server();
        app.shutdown.cancel();
        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server stopped in time")
            .unwrap();
        let _ = std::fs::remove_dir_all(dir);
    }
}
