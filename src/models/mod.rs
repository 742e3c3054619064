//! Data models
//!
//! Catalog entities and the records persisted by the client stores and the document store.

mod exercise;
mod goal;
mod macros;
mod meal;
mod settings;
mod tracking;
mod user;

pub use exercise::{Exercise, ExerciseCategory, Reps, Workout, WorkoutProgram};
pub use goal::{FitnessGoal, FitnessLevel};
pub use macros::Macros;
pub use meal::{Ingredient, Meal, MealPlan, MealType};
pub use settings::{
    AppSettings, AppSettingsUpdate, DistanceUnit, HeightUnit, NotificationSettings,
    TemperatureUnit, Theme, UnitSettings, WeightUnit,
};
pub use tracking::{
    Achievement, AchievementType, BodyMeasurements, CompletedExercise, CompletedSet,
    ConsumedMeal, DailyNutrition, PhotoType, ProgressEntry, ProgressPhoto, UserAchievement,
    WorkoutSession,
};
pub use user::{ActivityData, FamilyActivity, FamilyGroup, User, UserCreate, UserUpdate};
