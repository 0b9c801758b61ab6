use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::ListingError;

pub const PATH_SEPARATOR: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessRestriction {
    #[default]
    None,
    Push,
    Clone,
    View,
}

impl AccessRestriction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessRestriction::None => "NONE",
            AccessRestriction::Push => "PUSH",
            AccessRestriction::Clone => "CLONE",
            AccessRestriction::View => "VIEW",
        }
    }
}

impl fmt::Display for AccessRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessRestriction {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(AccessRestriction::None),
            "PUSH" => Ok(AccessRestriction::Push),
            "CLONE" => Ok(AccessRestriction::Clone),
            "VIEW" => Ok(AccessRestriction::View),
            _ => Err(ListingError::UnknownAccessRestriction(s.to_string())),
        }
    }
}

/// A repository as the catalog hands it to the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    pub name: String,
    pub description: String,
    pub owner: String,
    pub last_change: DateTime<Utc>,
    pub has_commits: bool,
    pub access_restriction: AccessRestriction,
    pub use_tickets: bool,
    pub use_docs: bool,
    pub is_frozen: bool,
}

impl RepositoryRecord {
    pub fn new(name: impl Into<String>, last_change: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            owner: String::new(),
            last_change,
            has_commits: true,
            access_restriction: AccessRestriction::None,
            use_tickets: false,
            use_docs: false,
            is_frozen: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_access_restriction(mut self, access_restriction: AccessRestriction) -> Self {
        self.access_restriction = access_restriction;
        self
    }

    /// Path prefix before the final separator, `None` when the name has none.
    pub fn root_path(&self) -> Option<&str> {
        self.name
            .rfind(PATH_SEPARATOR)
            .map(|idx| &self.name[..idx])
            .filter(|root| !root.is_empty())
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        !self.owner.is_empty() && fold_username(&self.owner) == fold_username(username)
    }
}

/// Case-folded form used to compare usernames. Folds every Unicode letter,
/// not just ASCII.
pub fn fold_username(username: &str) -> String {
    username.chars().flat_map(char::to_lowercase).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub can_admin: bool,
}

impl User {
    pub fn new(username: impl Into<String>, can_admin: bool) -> Self {
        Self {
            username: username.into(),
            can_admin,
        }
    }
}
