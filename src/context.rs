use std::net::SocketAddr;
use std::path::PathBuf;

use crate::listing::ListingSettings;
use crate::permissions::AdminPolicy;
use crate::types::DisplayMode;

/// Runtime settings resolved from the CLI and environment.
#[derive(Clone, Debug)]
pub struct Context {
    pub data_dir: PathBuf,
    pub reset: bool,
    pub log_file: Option<PathBuf>,
    pub api_listen: SocketAddr,
    pub listing: ListingSettings,
    pub admin: AdminPolicy,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            data_dir: PathBuf::from(&cli.data_dir),
            reset: cli.reset,
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            api_listen: cli.api_listen,
            listing: ListingSettings {
                mode: cli.list_type.parse().unwrap_or(DisplayMode::Flat),
                root_group_name: cli.root_group_name.clone(),
                page_size: cli.page_size,
            },
            admin: AdminPolicy {
                allow_administration: cli.allow_administration,
                authenticate_admin_pages: cli.authenticate_admin_pages,
            },
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("repolist.sqlite")
    }
}
