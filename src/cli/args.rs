use clap::Parser;
use std::env;

use crate::cli::command::Command;
use crate::types::DEFAULT_ROOT_GROUP_NAME;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Serve a sortable, paginated listing of Git repositories",
    long_about = "Keeps a catalog of Git repositories and serves them as a sortable, paginated or grouped listing over a REST API. Without a subcommand the REST daemon is started.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long,
        env = "REPOLIST_DATA_DIR",
        default_value = ".repolist/",
        value_name = "DIR",
        help = "Directory to store persistent data"
    )]
    pub data_dir: String,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset the catalog (delete the SQLite database) before starting"
    )]
    pub reset: bool,

    #[arg(
        long = "log-file",
        env = "REPOLIST_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "api-listen",
        env = "REPOLIST_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8084",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[arg(
        long = "list-type",
        env = "REPOLIST_LIST_TYPE",
        value_name = "MODE",
        default_value = "flat",
        help = "Listing display mode: flat or grouped"
    )]
    pub list_type: String,

    #[arg(
        long = "root-group-name",
        env = "REPOLIST_ROOT_GROUP_NAME",
        value_name = "NAME",
        default_value = DEFAULT_ROOT_GROUP_NAME,
        help = "Group label for repositories without a path prefix"
    )]
    pub root_group_name: String,

    #[arg(
        long = "page-size",
        env = "REPOLIST_PAGE_SIZE",
        value_name = "N",
        default_value_t = 50usize,
        help = "Repositories per page in flat mode (0 shows all)"
    )]
    pub page_size: usize,

    #[arg(
        long = "allow-administration",
        env = "REPOLIST_ALLOW_ADMINISTRATION",
        default_value_t = false,
        help = "Offer repository management links"
    )]
    pub allow_administration: bool,

    #[arg(
        long = "authenticate-admin-pages",
        env = "REPOLIST_AUTHENTICATE_ADMIN_PAGES",
        value_name = "BOOL",
        default_value_t = true,
        action = clap::ArgAction::Set,
        help = "Only show management links to admin users"
    )]
    pub authenticate_admin_pages: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    if dotenvy::from_filename(&dotenv_path).is_ok() {
        log::debug!("Loaded env from {}", dotenv_path);
    }

    Cli::parse()
}
