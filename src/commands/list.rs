use std::fmt::Write as _;

use super::CommandRunner;
use crate::cli;
use crate::context;
use crate::listing::{self, ListingQuery};
use crate::rest::models::{EntryResponse, ListingResponse, RepositoryResponse};
use crate::storage::Storage;
use crate::types::AccessRestriction;
use anyhow::{Context, Result};

impl CommandRunner for cli::ListArgs {
    fn run(&self, ctx: &context::Context, storage: &dyn Storage) -> Result<()> {
        let user = match self.user.as_deref() {
            Some(username) => {
                let user = storage
                    .load_user(username)
                    .with_context(|| format!("loading user {username}"))?;
                if user.is_none() {
                    log::warn!("Unknown user {}, listing anonymously", username);
                }
                user
            }
            None => None,
        };

        let records = storage
            .list_visible_repositories(user.as_ref())
            .context("listing repositories")?;

        let query = ListingQuery {
            sort: self.sort.clone(),
            ascending: self.ascending(),
            page: self.page,
            page_size: None,
        };
        let page = listing::build_listing(records, &ctx.listing, &query)?;
        let response = ListingResponse::from_page(page, user.as_ref(), &ctx.admin);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            print!("{}", render_table(&response));
        }
        Ok(())
    }
}

fn flags(repo: &RepositoryResponse) -> String {
    let mut out = String::new();
    if repo.use_tickets {
        out.push('T');
    }
    if repo.use_docs {
        out.push('D');
    }
    if repo.is_frozen {
        out.push('F');
    }
    match repo.access_restriction {
        AccessRestriction::None => {}
        restriction => {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(restriction.as_str());
        }
    }
    out
}

fn render_table(response: &ListingResponse) -> String {
    let mut out = String::new();

    if let Some(sort) = &response.sort {
        let arrow = if sort.ascending { "▲" } else { "▼" };
        let _ = writeln!(out, "sorted by {} {}", sort.field, arrow);
    }

    for entry in &response.entries {
        match entry {
            EntryResponse::Group { name } => {
                let _ = writeln!(out, "[{}]", name);
            }
            EntryResponse::Repository(repo) => {
                let name = if repo.has_commits {
                    repo.name.clone()
                } else {
                    format!("{} (empty)", repo.name)
                };
                let _ = writeln!(
                    out,
                    "{:<32} {:<32} {:<12} {:<20} {}",
                    name,
                    repo.description,
                    repo.owner,
                    repo.last_change.format("%Y-%m-%d %H:%M:%S"),
                    flags(repo)
                );
            }
        }
    }

    if response.sort.is_some() {
        let _ = writeln!(
            out,
            "page {}/{} ({} repositories)",
            response.page + 1,
            response.page_count,
            response.total
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{ListingPage, ListingSettings};
    use crate::permissions::AdminPolicy;
    use crate::types::{DisplayMode, ListingEntry, RepositoryRecord, DEFAULT_ROOT_GROUP_NAME};
    use chrono::DateTime;

    fn record(name: &str, secs: i64) -> RepositoryRecord {
        RepositoryRecord::new(name, DateTime::from_timestamp(secs, 0).unwrap())
    }

    fn policy() -> AdminPolicy {
        AdminPolicy {
            allow_administration: false,
            authenticate_admin_pages: true,
        }
    }

    #[test]
    fn flat_table_has_sort_header_and_page_footer() {
        let settings = ListingSettings {
            mode: DisplayMode::Flat,
            root_group_name: DEFAULT_ROOT_GROUP_NAME.to_string(),
            page_size: 50,
        };
        let mut empty = record("new.git", 0);
        empty.has_commits = false;
        let page = listing::build_listing(
            vec![record("libs/a.git", 10).with_owner("alice"), empty],
            &settings,
            &ListingQuery::default(),
        )
        .unwrap();
        let table = render_table(&ListingResponse::from_page(page, None, &policy()));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "sorted by date ▼");
        assert!(lines[1].starts_with("libs/a.git"));
        assert!(lines[1].contains("alice"));
        assert!(lines[2].starts_with("new.git (empty)"));
        assert_eq!(lines[3], "page 1/1 (2 repositories)");
    }

    #[test]
    fn grouped_table_prints_group_headers() {
        let page = ListingPage {
            mode: DisplayMode::Grouped,
            entries: vec![
                ListingEntry::Group("libs".to_string()),
                ListingEntry::Repository(record("libs/a.git", 1)),
            ],
            sort: None,
            page: 0,
            page_size: 2,
            page_count: 1,
            total: 1,
        };
        let table = render_table(&ListingResponse::from_page(page, None, &policy()));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "[libs]");
        assert!(lines[1].starts_with("libs/a.git"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn flags_list_features_then_restriction() {
        let mut repo = record("a.git", 1).with_access_restriction(AccessRestriction::Push);
        repo.use_tickets = true;
        repo.is_frozen = true;
        let response = RepositoryResponse::new(&repo, crate::permissions::RowActions::None);
        assert_eq!(flags(&response), "TF PUSH");
    }
}
