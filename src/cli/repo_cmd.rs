use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::types::AccessRestriction;

#[derive(Subcommand, Debug, Clone)]
pub enum RepoCmd {
    #[command(
        about = "Add or update a repository",
        long_about = "Insert a repository into the catalog, or update it in place when the name already exists. Updating keeps the repository's original listing position."
    )]
    Add {
        #[arg(long, value_name = "NAME", help = "Path-like repository name, e.g. libs/codec.git")]
        name: String,
        #[arg(long, value_name = "TEXT", default_value = "", help = "Free-text description")]
        description: String,
        #[arg(long, value_name = "USER", default_value = "", help = "Owning username")]
        owner: String,
        #[arg(
            long = "last-change",
            value_name = "RFC3339",
            help = "Time of the last change (defaults to now)"
        )]
        last_change: Option<DateTime<Utc>>,
        #[arg(
            long,
            value_name = "LEVEL",
            default_value = "NONE",
            help = "Access restriction: NONE, PUSH, CLONE or VIEW"
        )]
        access: AccessRestriction,
        #[arg(long, default_value_t = false, help = "Mark as an empty repository without commits")]
        empty: bool,
        #[arg(long, default_value_t = false, help = "Repository uses tickets")]
        tickets: bool,
        #[arg(long, default_value_t = false, help = "Repository uses docs")]
        docs: bool,
        #[arg(long, default_value_t = false, help = "Repository is frozen")]
        frozen: bool,
    },
    #[command(about = "Remove a repository from the catalog")]
    Remove {
        #[arg(long, value_name = "NAME")]
        name: String,
    },
}
