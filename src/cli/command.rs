use clap::Subcommand;

use crate::cli::list_cmd::ListArgs;
use crate::cli::repo_cmd::RepoCmd;
use crate::cli::user_cmd::UserCmd;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Repository catalog commands",
        long_about = "Add, update or remove repositories in the catalog."
    )]
    Repo {
        #[command(subcommand)]
        cmd: RepoCmd,
    },
    #[command(
        about = "User commands",
        long_about = "Register users whose identity drives visibility and management links."
    )]
    User {
        #[command(subcommand)]
        cmd: UserCmd,
    },
    #[command(
        about = "Print the repository listing",
        long_about = "Print the same listing the REST API serves, as a text table or JSON, using the configured display mode."
    )]
    List(ListArgs),
}
