use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listing::ListingPage;
use crate::permissions::{AdminPolicy, RowActions};
use crate::types::{
    AccessRestriction, DisplayMode, ListingEntry, RepositoryRecord, SortField, SortSpec, User,
};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryResponse {
    pub name: String,
    pub description: String,
    pub owner: String,
    pub last_change: DateTime<Utc>,
    pub has_commits: bool,
    pub access_restriction: AccessRestriction,
    pub use_tickets: bool,
    pub use_docs: bool,
    pub is_frozen: bool,
    pub actions: RowActions,
}

impl RepositoryResponse {
    pub fn new(record: &RepositoryRecord, actions: RowActions) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            owner: record.owner.clone(),
            last_change: record.last_change,
            has_commits: record.has_commits,
            access_restriction: record.access_restriction,
            use_tickets: record.use_tickets,
            use_docs: record.use_docs,
            is_frozen: record.is_frozen,
            actions,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryResponse {
    Group { name: String },
    Repository(RepositoryResponse),
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SortResponse {
    pub field: SortField,
    pub ascending: bool,
}

impl From<SortSpec> for SortResponse {
    fn from(spec: SortSpec) -> Self {
        Self {
            field: spec.field,
            ascending: spec.ascending,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub mode: DisplayMode,
    pub sort: Option<SortResponse>,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
    pub admin_panel: bool,
    pub entries: Vec<EntryResponse>,
}

impl ListingResponse {
    pub fn from_page(page: ListingPage, user: Option<&User>, policy: &AdminPolicy) -> Self {
        let entries = page
            .entries
            .iter()
            .map(|entry| match entry {
                ListingEntry::Group(_) => EntryResponse::Group {
                    name: entry.name().to_string(),
                },
                ListingEntry::Repository(record) => EntryResponse::Repository(
                    RepositoryResponse::new(record, policy.row_actions(user, record)),
                ),
            })
            .collect();

        Self {
            mode: page.mode,
            sort: page.sort.map(SortResponse::from),
            page: page.page,
            page_size: page.page_size,
            page_count: page.page_count,
            total: page.total,
            admin_panel: policy.shows_admin(user),
            entries,
        }
    }
}
