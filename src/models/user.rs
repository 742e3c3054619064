//! User and family models
//!
//! Profiles created after phone verification, family groups joined by invite code,
//! and the activity feed shared inside a family.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FitnessGoal;

/// A registered user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub phone_number: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>, // kg
    #[serde(default)]
    pub height: Option<f64>, // cm
    #[serde(default)]
    pub goal: Option<FitnessGoal>,
    #[serde(default)]
    pub family_group_id: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a user, produced by profile form validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub phone_number: String,
    pub name: String,
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub goal: FitnessGoal,
}

/// Data for updating a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<FitnessGoal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl User {
    /// Build a new profile; the id is assigned by the document store
    pub fn from_create(data: UserCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            phone_number: data.phone_number,
            name: data.name,
            age: Some(data.age),
            weight: Some(data.weight),
            height: Some(data.height),
            goal: Some(data.goal),
            family_group_id: None,
            profile_picture: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A family group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyGroup {
    pub id: String,
    pub name: String,
    pub members: Vec<String>, // user ids
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub invite_code: String,
}

impl FamilyGroup {
    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }
}

/// What happened in a family activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityData {
    WorkoutCompleted {
        #[serde(rename = "workoutId")]
        workout_id: String,
        #[serde(rename = "durationMinutes", default)]
        duration_minutes: Option<u32>,
    },
    GoalAchieved {
        goal: FitnessGoal,
    },
    ProgressUpdate {
        #[serde(default)]
        weight: Option<f64>,
        #[serde(rename = "bodyFat", default)]
        body_fat: Option<f64>,
    },
    MealLogged {
        #[serde(rename = "mealId")]
        meal_id: String,
    },
    AchievementUnlocked {
        #[serde(rename = "achievementId")]
        achievement_id: String,
    },
}

impl ActivityData {
    pub fn kind(&self) -> &'static str {
        match self {
            ActivityData::WorkoutCompleted { .. } => "workout_completed",
            ActivityData::GoalAchieved { .. } => "goal_achieved",
            ActivityData::ProgressUpdate { .. } => "progress_update",
            ActivityData::MealLogged { .. } => "meal_logged",
            ActivityData::AchievementUnlocked { .. } => "achievement_unlocked",
        }
    }
}

/// An entry in a family's activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyActivity {
    pub id: String,
    pub family_group_id: String,
    pub user_id: String,
    pub activity: ActivityData,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_is_tagged() {
        let activity = ActivityData::MealLogged {
            meal_id: "meal_002".to_string(),
        };
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "meal_logged");
        assert_eq!(json["mealId"], "meal_002");
        assert_eq!(activity.kind(), "meal_logged");

        let back: ActivityData = serde_json::from_value(json).unwrap();
        assert_eq!(back, activity);
    }

    #[test]
    fn test_unknown_activity_is_rejected() {
        let json = serde_json::json!({ "type": "dance_party" });
        assert!(serde_json::from_value::<ActivityData>(json).is_err());
    }

    #[test]
    fn test_user_from_create() {
        let now = Utc::now();
        let user = User::from_create(
            UserCreate {
                phone_number: "+15551234567".to_string(),
                name: "Sam".to_string(),
                age: 30,
                weight: 70.0,
                height: 175.0,
                goal: FitnessGoal::Maintenance,
            },
            now,
        );
        assert_eq!(user.age, Some(30));
        assert_eq!(user.family_group_id, None);
        assert_eq!(user.created_at, now);
    }
}
