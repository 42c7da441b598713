//! Member roster queries

use crate::{error::AppResult, models::Member, repository::Repository};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Members whose id, email, role or name contains `query`, any case
    pub async fn search(&self, query: &str) -> AppResult<Vec<Member>> {
        self.repository.users.search(query.trim()).await
    }

    /// Every member, ordered by id
    pub async fn list_all(&self) -> AppResult<Vec<Member>> {
        self.repository.users.search("").await
    }
}
