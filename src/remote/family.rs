//! Family groups and the family activity feed

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;

use super::{newest_first, Fields, Gateway, RemoteError, RemoteResult, UserService};
use crate::models::{ActivityData, FamilyActivity, FamilyGroup, User, UserUpdate};
use crate::validation::{check_family_name, normalize_invite_code};

/// Length of a family invite code
pub const INVITE_CODE_LEN: usize = 6;

const MAX_CODE_ATTEMPTS: usize = 8;

/// Random uppercase alphanumeric code
pub fn generate_invite_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(INVITE_CODE_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

#[derive(Clone)]
pub struct FamilyService {
    gateway: Gateway,
    users: UserService,
}

impl FamilyService {
    pub fn new(gateway: Gateway) -> Self {
        let users = UserService::new(gateway.clone());
        Self { gateway, users }
    }

    async fn find_by_invite_code(&self, code: &str) -> RemoteResult<Option<FamilyGroup>> {
        let groups: Vec<FamilyGroup> = self
            .gateway
            .find("inviteCode", Value::String(code.to_string()))
            .await?;
        Ok(groups.into_iter().next())
    }

    async fn unused_invite_code(&self) -> RemoteResult<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_invite_code();
            if self.find_by_invite_code(&code).await?.is_none() {
                return Ok(code);
            }
        }
        Err(RemoteError::Task(
            "could not allocate an unused invite code".to_string(),
        ))
    }

    /// Create a group with its creator as the only member and link the creator to it
    pub async fn create_family_group(&self, name: &str, created_by: &str) -> RemoteResult<FamilyGroup> {
        let name = check_family_name(name)?;
        let mut group = FamilyGroup {
            id: String::new(),
            name,
            members: vec![created_by.to_string()],
            created_by: created_by.to_string(),
            created_at: Utc::now(),
            invite_code: self.unused_invite_code().await?,
        };
        group.id = self.gateway.create(&group).await?;

        self.users
            .update_user(
                created_by,
                &UserUpdate {
                    family_group_id: Some(group.id.clone()),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(family_group_id = %group.id, created_by, "family group created");
        Ok(group)
    }

    /// Join the group with this invite code and return its id.
    ///
    /// The code is trimmed and uppercased first. Joining a group twice changes nothing.
    pub async fn join_family_group(&self, invite_code: &str, user_id: &str) -> RemoteResult<String> {
        let code = normalize_invite_code(invite_code)?;
        let mut group = self
            .find_by_invite_code(&code)
            .await?
            .ok_or(RemoteError::InvalidInviteCode)?;

        if !group.has_member(user_id) {
            group.members.push(user_id.to_string());
            let mut fields = Fields::new();
            fields.insert(
                "members".to_string(),
                Value::Array(group.members.iter().cloned().map(Value::String).collect()),
            );
            self.gateway.update::<FamilyGroup>(&group.id, fields).await?;

            self.users
                .update_user(
                    user_id,
                    &UserUpdate {
                        family_group_id: Some(group.id.clone()),
                        ..Default::default()
                    },
                )
                .await?;
            tracing::info!(family_group_id = %group.id, user_id, "joined family group");
        }

        Ok(group.id)
    }

    pub async fn get_family_group(&self, family_group_id: &str) -> RemoteResult<Option<FamilyGroup>> {
        self.gateway.get(family_group_id).await
    }

    /// Member profiles in membership order; members without a profile are skipped
    pub async fn get_family_members(&self, family_group_id: &str) -> RemoteResult<Vec<User>> {
        let Some(group) = self.get_family_group(family_group_id).await? else {
            return Ok(Vec::new());
        };
        let mut members = Vec::with_capacity(group.members.len());
        for member_id in &group.members {
            if let Some(user) = self.users.get_user(member_id).await? {
                members.push(user);
            }
        }
        Ok(members)
    }

    pub async fn create_family_activity(
        &self,
        family_group_id: &str,
        user_id: &str,
        activity: ActivityData,
    ) -> RemoteResult<FamilyActivity> {
        let mut record = FamilyActivity {
            id: String::new(),
            family_group_id: family_group_id.to_string(),
            user_id: user_id.to_string(),
            activity,
            created_at: Utc::now(),
        };
        record.id = self.gateway.create(&record).await?;
        Ok(record)
    }

    /// Newest first
    pub async fn get_family_activities(
        &self,
        family_group_id: &str,
        limit: Option<usize>,
    ) -> RemoteResult<Vec<FamilyActivity>> {
        let activities: Vec<FamilyActivity> = self
            .gateway
            .find("familyGroupId", Value::String(family_group_id.to_string()))
            .await?;
        Ok(newest_first(activities, |a| a.created_at, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::db;
    use crate::models::{FitnessGoal, UserCreate};
    use crate::remote::{SqliteDocumentStore, DEFAULT_TIMEOUT};

    fn gateway() -> Gateway {
        let store = SqliteDocumentStore::new(db::in_memory_migrated().unwrap());
        Gateway::new(Arc::new(store), DEFAULT_TIMEOUT)
    }

    async fn user(users: &UserService, name: &str) -> User {
        users
            .create_user(UserCreate {
                phone_number: format!("+1555{}", name.len()),
                name: name.to_string(),
                age: 40,
                weight: 80.0,
                height: 180.0,
                goal: FitnessGoal::Maintenance,
            })
            .await
            .unwrap()
    }

    #[test]
    fn test_invite_code_shape() {
        for _ in 0..50 {
            let code = generate_invite_code();
            assert_eq!(code.len(), INVITE_CODE_LEN);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[tokio::test]
    async fn test_create_and_join_family() {
        let gateway = gateway();
        let users = UserService::new(gateway.clone());
        let family = FamilyService::new(gateway);

        let parent = user(&users, "Alex").await;
        let kid = user(&users, "Jo").await;

        let group = family
            .create_family_group("  The Rivers ", &parent.id)
            .await
            .unwrap();
        assert_eq!(group.name, "The Rivers");
        assert_eq!(group.members, vec![parent.id.clone()]);

        let joined = family
            .join_family_group(&format!(" {} ", group.invite_code.to_lowercase()), &kid.id)
            .await
            .unwrap();
        assert_eq!(joined, group.id);
        // joining again is a no-op
        family
            .join_family_group(&group.invite_code, &kid.id)
            .await
            .unwrap();

        let stored = family.get_family_group(&group.id).await.unwrap().unwrap();
        assert_eq!(stored.members, vec![parent.id.clone(), kid.id.clone()]);

        let members = family.get_family_members(&group.id).await.unwrap();
        let names: Vec<&str> = members.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Alex", "Jo"]);
        assert_eq!(
            users.get_user(&kid.id).await.unwrap().unwrap().family_group_id,
            Some(group.id.clone())
        );
    }

    #[tokio::test]
    async fn test_join_errors() {
        let family = FamilyService::new(gateway());
        assert!(matches!(
            family.join_family_group("ZZZZZZ", "u1").await,
            Err(RemoteError::InvalidInviteCode)
        ));
        assert!(matches!(
            family.join_family_group("   ", "u1").await,
            Err(RemoteError::Validation(_))
        ));
        assert!(family.get_family_members("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_activity_feed_newest_first() {
        let family = FamilyService::new(gateway());
        for meal in ["meal_001", "meal_002", "meal_003"] {
            family
                .create_family_activity(
                    "fam1",
                    "u1",
                    ActivityData::MealLogged {
                        meal_id: meal.to_string(),
                    },
                )
                .await
                .unwrap();
        }
        family
            .create_family_activity("fam2", "u2", ActivityData::GoalAchieved { goal: FitnessGoal::Bulking })
            .await
            .unwrap();

        let feed = family.get_family_activities("fam1", Some(2)).await.unwrap();
        assert_eq!(feed.len(), 2);
        assert!(feed[0].created_at >= feed[1].created_at);
        assert!(feed.iter().all(|a| a.family_group_id == "fam1"));
    }
}
