mod args;
mod command;
mod list_cmd;
mod repo_cmd;
mod user_cmd;

pub use args::Cli;
pub use command::Command;
pub use list_cmd::ListArgs;
pub use repo_cmd::RepoCmd;
pub use user_cmd::UserCmd;

pub use args::parse;
