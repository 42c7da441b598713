//! Business logic services

pub mod auth;
pub mod inventory;
pub mod members;
pub mod redis;
pub mod sessions;

use std::sync::Arc;

use crate::{config::SessionConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub inventory: inventory::InventoryService,
    pub members: members::MembersService,
    pub sessions: sessions::SessionService,
}

impl Services {
    /// Create all services over the given repository and session store
    pub fn new(
        repository: Repository,
        session_store: Arc<dyn sessions::SessionStore>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone()),
            inventory: inventory::InventoryService::new(repository.clone()),
            members: members::MembersService::new(repository),
            sessions: sessions::SessionService::new(session_store, session_config),
        }
    }
}
