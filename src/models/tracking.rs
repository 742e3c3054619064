//! Tracking models
//!
//! Workout sessions, daily nutrition logs, progress entries and achievements.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Macros;

/// A performed set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSet {
    pub reps: u32,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub duration: Option<u32>, // seconds, for timed exercises
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedExercise {
    pub exercise_id: String,
    pub sets: Vec<CompletedSet>,
    pub completed: bool,
}

/// A workout performed by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: String,
    pub user_id: String,
    pub workout_id: String,
    pub date: DateTime<Utc>,
    pub completed: bool,
    pub exercises: Vec<CompletedExercise>,
    #[serde(default)]
    pub duration: Option<u32>, // actual minutes
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkoutSession {
    pub fn completed_sets(&self) -> usize {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .filter(|s| s.completed)
            .count()
    }
}

/// A meal eaten during a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedMeal {
    pub meal_id: String,
    pub servings: f64,
    pub consumed: bool,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

/// One user's nutrition log for a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyNutrition {
    pub id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub meals: Vec<ConsumedMeal>,
    pub water_intake: f64, // ml
    pub total_calories: f64,
    pub total_macros: Macros,
}

impl DailyNutrition {
    /// Empty log for a user and moment
    pub fn new(id: String, user_id: String, date: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            date,
            meals: Vec::new(),
            water_intake: 0.0,
            total_calories: 0.0,
            total_macros: Macros::zero(),
        }
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date.date_naive() == day
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurements {
    #[serde(default)]
    pub chest: Option<f64>,
    #[serde(default)]
    pub waist: Option<f64>,
    #[serde(default)]
    pub hips: Option<f64>,
    #[serde(default)]
    pub bicep: Option<f64>,
    #[serde(default)]
    pub thigh: Option<f64>,
    #[serde(default)]
    pub neck: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoType {
    Front,
    Side,
    Back,
}

/// Reference to an uploaded progress photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPhoto {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub photo_type: PhotoType,
    pub date: DateTime<Utc>,
}

/// A body progress check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub body_fat: Option<f64>,
    #[serde(default)]
    pub measurements: Option<BodyMeasurements>,
    #[serde(default)]
    pub photos: Vec<ProgressPhoto>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementType {
    WorkoutStreak,
    WeightLoss,
    WeightGain,
    TotalWorkouts,
    TotalCalories,
}

/// An achievement definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub achievement_type: AchievementType,
    pub requirement: f64,
    pub unit: String,
}

/// A user's progress towards (or unlock of) an achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    pub id: String,
    pub user_id: String,
    pub achievement_id: String,
    pub unlocked_at: DateTime<Utc>,
    pub progress: f64,
}
