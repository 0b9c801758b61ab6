use crate::cli::Command;
use crate::context;
use crate::storage::Storage;

pub mod list;
pub mod repo;
pub mod user;

pub trait CommandRunner {
    fn run(&self, ctx: &context::Context, storage: &dyn Storage) -> anyhow::Result<()>;
}

impl Command {
    pub fn run(&self, ctx: &context::Context, storage: &dyn Storage) -> anyhow::Result<()> {
        match self {
            Command::Repo { cmd } => cmd.run(ctx, storage),
            Command::User { cmd } => cmd.run(ctx, storage),
            Command::List(args) => args.run(ctx, storage),
        }
    }
}
