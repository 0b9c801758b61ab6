//! Sorting, grouping and paging of repository listings.

mod grouping;
mod pagination;
mod provider;

pub use grouping::grouped_listing;
pub use pagination::Pagination;
pub use provider::ListingProvider;

use crate::types::{
    DisplayMode, ListingEntry, ListingError, RepositoryRecord, SortField, SortSpec,
};

/// Listing settings taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSettings {
    pub mode: DisplayMode,
    pub root_group_name: String,
    pub page_size: usize,
}

/// What a caller asked for. Ignored entirely in grouped mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub sort: Option<String>,
    pub ascending: Option<bool>,
    pub page: usize,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub mode: DisplayMode,
    pub entries: Vec<ListingEntry>,
    /// Active ordering; `None` in grouped mode.
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
}

pub fn build_listing(
    records: Vec<RepositoryRecord>,
    settings: &ListingSettings,
    query: &ListingQuery,
) -> Result<ListingPage, ListingError> {
    let total = records.len();

    if settings.mode == DisplayMode::Grouped {
        let entries = grouped_listing(records, &settings.root_group_name);
        return Ok(ListingPage {
            mode: DisplayMode::Grouped,
            page_size: entries.len(),
            entries,
            sort: None,
            page: 0,
            page_count: 1,
            total,
        });
    }

    let mut provider = ListingProvider::new(records);
    match (&query.sort, query.ascending) {
        (Some(field), ascending) => {
            if !provider.set_sort_by_name(field, ascending.unwrap_or(true)) {
                let known: Vec<&str> = SortField::ALL.iter().map(SortField::as_str).collect();
                log::warn!(
                    "Unknown sort field {:?}, expected one of {}",
                    field,
                    known.join(", ")
                );
            }
        }
        (None, Some(ascending)) => {
            let field = provider.sort().field;
            provider.set_sort(field, ascending);
        }
        (None, None) => {}
    }

    let page_size = query.page_size.unwrap_or(settings.page_size);
    let pagination = Pagination::new(provider.size(), page_size);
    let window = pagination.window(query.page);
    let entries = provider
        .window(window.first, window.count)?
        .cloned()
        .map(ListingEntry::Repository)
        .collect();

    Ok(ListingPage {
        mode: DisplayMode::Flat,
        entries,
        sort: Some(provider.sort()),
        page: window.page,
        page_size,
        page_count: pagination.page_count(),
        total,
    })
}
