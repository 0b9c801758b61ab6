use super::CommandRunner;
use crate::cli;
use crate::context;
use crate::storage::Storage;
use crate::types::User;
use anyhow::{Context, Result};

impl CommandRunner for cli::UserCmd {
    fn run(&self, _ctx: &context::Context, storage: &dyn Storage) -> Result<()> {
        match self {
            cli::UserCmd::Add { username, admin } => {
                let username = username.trim();
                if username.is_empty() {
                    anyhow::bail!("username must not be empty");
                }
                storage
                    .save_user(&User::new(username, *admin))
                    .with_context(|| format!("saving user {username}"))?;
                log::info!("👤 Saved user {} (admin={})", username, admin);
                Ok(())
            }
        }
    }
}
