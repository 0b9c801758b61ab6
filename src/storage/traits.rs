use anyhow::Result;

use crate::permissions;
use crate::types::{RepositoryRecord, User};

pub trait Storage {
    /// Every repository, in the order it was first saved.
    fn list_repositories(&self) -> Result<Vec<RepositoryRecord>>;
    fn load_repository(&self, name: &str) -> Result<Option<RepositoryRecord>>;
    fn save_repository(&self, record: &RepositoryRecord) -> Result<()>;
    fn remove_repository(&self, name: &str) -> Result<bool>;

    fn load_user(&self, username: &str) -> Result<Option<User>>;
    fn save_user(&self, user: &User) -> Result<()>;

    /// Repositories `user` may see. Each call returns a freshly owned list.
    fn list_visible_repositories(&self, user: Option<&User>) -> Result<Vec<RepositoryRecord>> {
        let mut records = self.list_repositories()?;
        records.retain(|record| permissions::can_view(user, record));
        Ok(records)
    }
}
