use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("window of {count} entries at offset {first} exceeds listing of {size} entries")]
    WindowOutOfRange {
        first: usize,
        count: usize,
        size: usize,
    },
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
    #[error("unknown access restriction: {0}")]
    UnknownAccessRestriction(String),
}
