use std::str::FromStr;

use crate::types::{ListingError, RepositoryRecord, SortField, SortSpec};

/// Sortable, windowed view over one request's repository records.
///
/// The provider owns its records. Every [`ListingProvider::window`] call
/// re-sorts the whole collection in place with a stable sort, so equal keys
/// keep the order left behind by the previous request.
#[derive(Debug, Clone, Default)]
pub struct ListingProvider {
    records: Vec<RepositoryRecord>,
    sort: SortSpec,
}

impl ListingProvider {
    pub fn new(records: Vec<RepositoryRecord>) -> Self {
        Self {
            records,
            sort: SortSpec::default(),
        }
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn set_sort(&mut self, field: SortField, ascending: bool) {
        self.sort = SortSpec::new(field, ascending);
    }

    /// Returns whether the name was recognized. Unknown names leave the
    /// active sort untouched.
    pub fn set_sort_by_name(&mut self, field: &str, ascending: bool) -> bool {
        match SortField::from_str(field) {
            Ok(field) => {
                self.set_sort(field, ascending);
                true
            }
            Err(err) => {
                log::debug!("ignoring sort request: {}", err);
                false
            }
        }
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn window(
        &mut self,
        first: usize,
        count: usize,
    ) -> Result<std::slice::Iter<'_, RepositoryRecord>, ListingError> {
        let size = self.records.len();
        let end = first
            .checked_add(count)
            .filter(|end| *end <= size)
            .ok_or(ListingError::WindowOutOfRange { first, count, size })?;

        let spec = self.sort;
        self.records.sort_by(|a, b| spec.compare(a, b));

        Ok(self.records[first..end].iter())
    }
}
