//! Session state

use serde::{Deserialize, Serialize};

use super::{Store, StoreResult, StoreState};
use crate::models::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl StoreState for AuthState {
    const NAME: &'static str = "auth";
    const STORAGE_KEY: Option<&'static str> = Some("auth-storage");
}

impl Store<AuthState> {
    pub fn set_user(&mut self, user: Option<User>) -> StoreResult<&AuthState> {
        self.update(|s| s.user = user)
    }

    pub fn set_authenticated(&mut self, authenticated: bool) -> StoreResult<&AuthState> {
        self.update(|s| s.is_authenticated = authenticated)
    }

    pub fn set_loading(&mut self, loading: bool) -> StoreResult<&AuthState> {
        self.update(|s| s.is_loading = loading)
    }

    /// Drop the user and the authenticated flag
    pub fn logout(&mut self) -> StoreResult<&AuthState> {
        self.update(|s| {
            s.user = None;
            s.is_authenticated = false;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::{FitnessGoal, UserCreate};

    #[test]
    fn test_login_then_logout() {
        let mut store: Store<AuthState> = Store::new();
        let user = User::from_create(
            UserCreate {
                phone_number: "+15551234567".to_string(),
                name: "Sam".to_string(),
                age: 30,
                weight: 70.0,
                height: 175.0,
                goal: FitnessGoal::Bulking,
            },
            Utc::now(),
        );
        store.set_user(Some(user)).unwrap();
        store.set_authenticated(true).unwrap();
        store.set_loading(true).unwrap();
        assert!(store.get().is_authenticated);

        let state = store.logout().unwrap();
        assert!(state.user.is_none());
        assert!(!state.is_authenticated);
        assert!(state.is_loading);
    }
}
