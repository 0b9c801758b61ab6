use super::RepositoryRecord;

/// One row of a listing: either a synthetic group header or a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEntry {
    Group(String),
    Repository(RepositoryRecord),
}

impl ListingEntry {
    pub fn name(&self) -> &str {
        match self {
            ListingEntry::Group(key) => key,
            ListingEntry::Repository(record) => &record.name,
        }
    }
}
