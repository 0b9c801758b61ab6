use serde::{Deserialize, Serialize};

use crate::types::{AccessRestriction, RepositoryRecord, User};

/// Administration settings that decide which management links a viewer gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminPolicy {
    pub allow_administration: bool,
    pub authenticate_admin_pages: bool,
}

impl AdminPolicy {
    pub fn shows_admin(&self, user: Option<&User>) -> bool {
        if self.authenticate_admin_pages {
            self.allow_administration && user.is_some_and(|u| u.can_admin)
        } else {
            self.allow_administration
        }
    }

    pub fn row_actions(&self, user: Option<&User>, record: &RepositoryRecord) -> RowActions {
        if self.shows_admin(user) {
            RowActions::Admin
        } else if user.is_some_and(|u| record.is_owned_by(&u.username)) {
            RowActions::Owner
        } else {
            RowActions::None
        }
    }
}

/// Management links offered on a repository row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowActions {
    /// Edit, with rename and delete shown but disabled.
    Admin,
    /// Edit only.
    Owner,
    None,
}

pub fn can_view(user: Option<&User>, record: &RepositoryRecord) -> bool {
    if record.access_restriction != AccessRestriction::View {
        return true;
    }
    match user {
        Some(user) => user.can_admin || record.is_owned_by(&user.username),
        None => false,
    }
}
