use super::CommandRunner;
use crate::cli;
use crate::context;
use crate::storage::Storage;
use crate::types::RepositoryRecord;
use anyhow::{Context, Result};
use chrono::Utc;

impl CommandRunner for cli::RepoCmd {
    fn run(&self, _ctx: &context::Context, storage: &dyn Storage) -> Result<()> {
        match self {
            cli::RepoCmd::Add {
                name,
                description,
                owner,
                last_change,
                access,
                empty,
                tickets,
                docs,
                frozen,
            } => {
                let name = name.trim();
                if name.is_empty() {
                    anyhow::bail!("repository name must not be empty");
                }
                let mut record =
                    RepositoryRecord::new(name, (*last_change).unwrap_or_else(Utc::now))
                        .with_description(description.as_str())
                        .with_owner(owner.as_str())
                        .with_access_restriction(*access);
                record.has_commits = !empty;
                record.use_tickets = *tickets;
                record.use_docs = *docs;
                record.is_frozen = *frozen;
                storage
                    .save_repository(&record)
                    .with_context(|| format!("saving repository {}", record.name))?;
                log::info!("📦 Saved repository {}", record.name);
                Ok(())
            }
            cli::RepoCmd::Remove { name } => {
                let removed = storage
                    .remove_repository(name)
                    .with_context(|| format!("removing repository {name}"))?;
                if removed {
                    log::info!("🗑️ Removed repository {}", name);
                } else {
                    log::warn!("Repository {} not found", name);
                }
                Ok(())
            }
        }
    }
}
