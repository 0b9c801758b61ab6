use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};

use super::{ListingError, RepositoryRecord};

/// Column a flat listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Repository,
    Description,
    Owner,
    Date,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Repository,
        SortField::Description,
        SortField::Owner,
        SortField::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Repository => "repository",
            SortField::Description => "description",
            SortField::Owner => "owner",
            SortField::Date => "date",
        }
    }

    fn compare(&self, a: &RepositoryRecord, b: &RepositoryRecord) -> Ordering {
        match self {
            SortField::Repository => a.name.cmp(&b.name),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Owner => a.owner.cmp(&b.owner),
            SortField::Date => a.last_change.cmp(&b.last_change),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repository" => Ok(SortField::Repository),
            "description" => Ok(SortField::Description),
            "owner" => Ok(SortField::Owner),
            "date" => Ok(SortField::Date),
            _ => Err(ListingError::UnknownSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub ascending: bool,
}

impl SortSpec {
    pub fn new(field: SortField, ascending: bool) -> Self {
        Self { field, ascending }
    }

    /// Descending swaps the operands. There is no secondary key.
    pub fn compare(&self, a: &RepositoryRecord, b: &RepositoryRecord) -> Ordering {
        if self.ascending {
            self.field.compare(a, b)
        } else {
            self.field.compare(b, a)
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortField::Date, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn record(name: &str, secs: i64) -> RepositoryRecord {
        RepositoryRecord::new(name, DateTime::from_timestamp(secs, 0).unwrap())
    }

    #[test]
    fn default_is_most_recent_first() {
        let spec = SortSpec::default();
        assert_eq!(spec.field, SortField::Date);
        assert!(!spec.ascending);
    }

    #[test]
    fn field_names_round_trip_through_from_str() {
        for field in SortField::ALL {
            assert_eq!(SortField::from_str(field.as_str()).unwrap(), field);
        }
        assert!(matches!(
            SortField::from_str("Date"),
            Err(ListingError::UnknownSortField(_))
        ));
    }

    #[test]
    fn direction_swaps_operands() {
        let older = record("a", 1);
        let newer = record("b", 2);
        let asc = SortSpec::new(SortField::Date, true);
        let desc = SortSpec::new(SortField::Date, false);
        assert_eq!(asc.compare(&older, &newer), Ordering::Less);
        assert_eq!(desc.compare(&older, &newer), Ordering::Greater);
        assert_eq!(desc.compare(&older, &older), Ordering::Equal);
    }

    #[test]
    fn empty_owner_sorts_first_ascending() {
        let unowned = record("a", 1);
        let owned = record("b", 1).with_owner("alice");
        let spec = SortSpec::new(SortField::Owner, true);
        assert_eq!(spec.compare(&unowned, &owned), Ordering::Less);
    }

    #[test]
    fn string_fields_are_case_sensitive() {
        let upper = record("Zeta", 1);
        let lower = record("alpha", 1);
        let spec = SortSpec::new(SortField::Repository, true);
        assert_eq!(spec.compare(&upper, &lower), Ordering::Less);
    }
}
