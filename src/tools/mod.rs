//! FitFam Tools module
//!
//! Tool implementations behind the MCP server. Stateless tools take the catalog;
//! stateful ones take the client stores and the remote services.

pub mod account;
pub mod catalog;
pub mod grocery;
pub mod health;
pub mod status;
pub mod tracking;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::remote::{FamilyService, Gateway, TrackingService, UserService};
use crate::store::AppStores;

/// The remote services the tools call
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub family: FamilyService,
    pub tracking: TrackingService,
}

impl Services {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            users: UserService::new(gateway.clone()),
            family: FamilyService::new(gateway.clone()),
            tracking: TrackingService::new(gateway),
        }
    }
}

/// The signed-in user
pub fn current_user(stores: &AppStores) -> AppResult<&User> {
    let auth = stores.auth.get();
    match &auth.user {
        Some(user) if auth.is_authenticated => Ok(user),
        _ => Err(AppError::InvalidInput(
            "No user is signed in. Call sign_in (and create_profile for new numbers) first."
                .to_string(),
        )),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::Services;
    use crate::db;
    use crate::remote::{Gateway, SqliteDocumentStore, DEFAULT_TIMEOUT};

    pub fn services() -> Services {
        let store = SqliteDocumentStore::new(db::in_memory_migrated().unwrap());
        Services::new(Gateway::new(Arc::new(store), DEFAULT_TIMEOUT))
    }
}
