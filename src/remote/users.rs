//! User profiles in the document store

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use super::{to_fields, Gateway, RemoteResult};
use crate::models::{User, UserCreate, UserUpdate};

#[derive(Clone)]
pub struct UserService {
    gateway: Gateway,
}

impl UserService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Store a new profile and return it with its assigned id
    pub async fn create_user(&self, data: UserCreate) -> RemoteResult<User> {
        let mut user = User::from_create(data, Utc::now());
        user.id = self.gateway.create(&user).await?;
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> RemoteResult<Option<User>> {
        self.gateway.get(user_id).await
    }

    /// Merge the given fields and bump `updatedAt`
    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> RemoteResult<()> {
        let mut fields = to_fields::<User, _>(update)?;
        fields.insert(
            "updatedAt".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );
        self.gateway.update::<User>(user_id, fields).await
    }

    /// First user registered with this phone number
    pub async fn get_user_by_phone_number(&self, phone_number: &str) -> RemoteResult<Option<User>> {
        let users: Vec<User> = self
            .gateway
            .find("phoneNumber", Value::String(phone_number.to_string()))
            .await?;
        Ok(users.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::db;
    use crate::models::FitnessGoal;
    use crate::remote::{RemoteError, SqliteDocumentStore, DEFAULT_TIMEOUT};

    fn service() -> UserService {
        let store = SqliteDocumentStore::new(db::in_memory_migrated().unwrap());
        UserService::new(Gateway::new(Arc::new(store), DEFAULT_TIMEOUT))
    }

    fn profile(phone: &str) -> UserCreate {
        UserCreate {
            phone_number: phone.to_string(),
            name: "Sam".to_string(),
            age: 30,
            weight: 70.0,
            height: 175.0,
            goal: FitnessGoal::WeightLoss,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let users = service();
        let created = users.create_user(profile("+15551234567")).await.unwrap();
        assert!(!created.id.is_empty());

        let fetched = users.get_user(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(users.get_user("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let users = service();
        let created = users.create_user(profile("+15551234567")).await.unwrap();
        users
            .update_user(
                &created.id,
                &UserUpdate {
                    weight: Some(68.5),
                    family_group_id: Some("fam1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let fetched = users.get_user(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.weight, Some(68.5));
        assert_eq!(fetched.family_group_id.as_deref(), Some("fam1"));
        assert_eq!(fetched.name, "Sam");
        assert!(fetched.updated_at >= created.updated_at);

        let err = users
            .update_user("missing", &UserUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_lookup_by_phone() {
        let users = service();
        users.create_user(profile("+15550000001")).await.unwrap();
        let second = users.create_user(profile("+15550000002")).await.unwrap();

        let found = users
            .get_user_by_phone_number("+15550000002")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, second.id);
        assert!(users
            .get_user_by_phone_number("+15559999999")
            .await
            .unwrap()
            .is_none());
    }
}
