mod display_mode;
mod entry;
mod listing_error;
mod repository;
mod sort;

pub use display_mode::DisplayMode;
pub use entry::ListingEntry;
pub use listing_error::ListingError;
pub use repository::{fold_username, AccessRestriction, RepositoryRecord, User};
pub use sort::{SortField, SortSpec};

/// Group name used when no root group name is configured.
pub const DEFAULT_ROOT_GROUP_NAME: &str = " ";
