//! Tracking Tools
//!
//! Daily nutrition and water, workout sessions and body progress. Each tool
//! updates the client stores and, where the record is shared, the document store.
//! Completed workouts, logged meals and progress check-ins are also posted to the
//! family feed when the user belongs to a family.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::catalog::MealPlanSummary;
use super::{current_user, Services};
use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::models::{
    ActivityData, BodyMeasurements, CompletedExercise, CompletedSet, ConsumedMeal,
    DailyNutrition, Macros, ProgressEntry, Workout, WorkoutSession,
};
use crate::store::AppStores;

/// Default page size for history tools
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub log_id: String,
    pub date: DateTime<Utc>,
    pub meals_logged: usize,
    pub total_calories: f64,
    pub total_macros: Macros,
    pub water_intake_ml: f64,
    pub planned_calories: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SaveDayResponse {
    pub log_id: String,
    pub created: bool,
}

#[derive(Debug, Serialize)]
pub struct ProgramSelection {
    pub program_id: String,
    pub name: String,
    pub todays_workout: Option<Workout>,
}

#[derive(Debug, Serialize)]
pub struct ProgressSummary {
    pub current_weight: Option<f64>,
    pub current_body_fat: Option<f64>,
    pub entries: Vec<ProgressEntry>,
}

/// Input for one check-in; at least one measurement is required
#[derive(Debug, Clone, Default)]
pub struct ProgressInput {
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub measurements: Option<BodyMeasurements>,
    pub notes: Option<String>,
}

/// Make sure the nutrition store holds the user's log for today; a new day
/// starts with an empty log and no water
fn ensure_today(stores: &mut AppStores, user_id: &str, now: DateTime<Utc>) -> AppResult<()> {
    let today = now.date_naive();
    let current = stores
        .nutrition
        .get()
        .daily_nutrition
        .as_ref()
        .is_some_and(|log| log.user_id == user_id && log.is_on(today));
    if !current {
        let log = DailyNutrition::new(Uuid::new_v4().to_string(), user_id.to_string(), now);
        stores.nutrition.start_day(log)?;
        tracing::debug!(user_id, %today, "started a new daily log");
    }
    Ok(())
}

fn day_summary(stores: &AppStores) -> AppResult<DaySummary> {
    let state = stores.nutrition.get();
    let log = state
        .daily_nutrition
        .as_ref()
        .ok_or_else(|| AppError::not_found("Daily nutrition log"))?;
    Ok(DaySummary {
        log_id: log.id.clone(),
        date: log.date,
        meals_logged: log.meals.len(),
        total_calories: log.total_calories,
        total_macros: log.total_macros,
        water_intake_ml: state.water_intake,
        planned_calories: state.current_meal_plan.as_ref().map(|p| p.daily_calories),
    })
}

/// Post to the family feed. The record it describes is already saved, so a
/// failed post is logged and dropped.
async fn share(stores: &mut AppStores, services: &Services, activity: ActivityData) {
    let Ok(user) = current_user(stores) else {
        return;
    };
    let Some(group_id) = user.family_group_id.clone() else {
        return;
    };
    let user_id = user.id.clone();
    let kind = activity.kind();

    match services
        .family
        .create_family_activity(&group_id, &user_id, activity)
        .await
    {
        Ok(record) => {
            if let Err(e) = stores.family.add_family_activity(record) {
                tracing::warn!(error = %e, "could not add activity to the family store");
            }
        }
        Err(e) => tracing::warn!(kind, error = %e, "could not post family activity"),
    }
}

// ============================================================================
// Nutrition
// ============================================================================

pub fn select_meal_plan(
    stores: &mut AppStores,
    catalog: &Catalog,
    plan_id: &str,
) -> AppResult<MealPlanSummary> {
    let plan = catalog
        .meal_plan(plan_id)
        .ok_or_else(|| AppError::not_found(format!("Meal plan '{}'", plan_id)))?;
    stores.nutrition.set_current_meal_plan(Some(plan.clone()))?;
    Ok(MealPlanSummary::from(plan))
}

/// Add water (ml) to today's intake
pub fn add_water(stores: &mut AppStores, amount_ml: f64) -> AppResult<DaySummary> {
    let user_id = current_user(stores)?.id.clone();
    ensure_today(stores, &user_id, Utc::now())?;
    stores.nutrition.add_water(amount_ml)?;
    day_summary(stores)
}

/// Record servings of a catalog meal in today's log
pub async fn log_meal(
    stores: &mut AppStores,
    services: &Services,
    catalog: &Catalog,
    meal_id: &str,
    servings: f64,
) -> AppResult<DaySummary> {
    if !(servings.is_finite() && servings > 0.0) {
        return Err(AppError::InvalidInput("servings must be a positive number".to_string()));
    }
    let meal = catalog
        .meal(meal_id)
        .ok_or_else(|| AppError::not_found(format!("Meal '{}'", meal_id)))?;
    let user_id = current_user(stores)?.id.clone();
    let now = Utc::now();
    ensure_today(stores, &user_id, now)?;

    let entry = ConsumedMeal {
        meal_id: meal.id.clone(),
        servings,
        consumed: true,
        time: Some(now),
    };
    stores.nutrition.log_meal(entry, meal)?;
    share(
        stores,
        services,
        ActivityData::MealLogged {
            meal_id: meal.id.clone(),
        },
    )
    .await;
    day_summary(stores)
}

/// Today's log as the stores hold it
pub fn today(stores: &mut AppStores) -> AppResult<DaySummary> {
    let user_id = current_user(stores)?.id.clone();
    ensure_today(stores, &user_id, Utc::now())?;
    day_summary(stores)
}

/// Push today's log to the document store, updating the saved copy if there is one
pub async fn save_day(stores: &mut AppStores, services: &Services) -> AppResult<SaveDayResponse> {
    let user_id = current_user(stores)?.id.clone();
    let now = Utc::now();
    ensure_today(stores, &user_id, now)?;

    let state = stores.nutrition.get();
    let mut log = state
        .daily_nutrition
        .clone()
        .ok_or_else(|| AppError::not_found("Daily nutrition log"))?;
    log.water_intake = state.water_intake;

    let saved = services
        .tracking
        .get_daily_nutrition(&user_id, now.date_naive())
        .await?;
    let (log_id, created) = match saved {
        Some(existing) => {
            services.tracking.update_daily_nutrition(&existing.id, &log).await?;
            (existing.id, false)
        }
        None => (services.tracking.save_daily_nutrition(&log).await?, true),
    };

    log.id = log_id.clone();
    stores.nutrition.set_daily_nutrition(Some(log))?;
    Ok(SaveDayResponse { log_id, created })
}

/// A saved log for any day
pub async fn get_day(
    stores: &AppStores,
    services: &Services,
    date: &str,
) -> AppResult<Option<DailyNutrition>> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::InvalidInput(format!("Invalid date '{}'. Use YYYY-MM-DD", date))
    })?;
    let user_id = current_user(stores)?.id.clone();
    Ok(services.tracking.get_daily_nutrition(&user_id, day).await?)
}

// ============================================================================
// Workouts
// ============================================================================

/// Follow a program; its first workout becomes today's workout
pub fn select_program(
    stores: &mut AppStores,
    catalog: &Catalog,
    program_id: &str,
) -> AppResult<ProgramSelection> {
    let program = catalog
        .workout_program(program_id)
        .ok_or_else(|| AppError::not_found(format!("Workout program '{}'", program_id)))?;
    let first = program.workouts.first().cloned();
    stores.workout.follow_program(program.clone(), first.clone())?;
    Ok(ProgramSelection {
        program_id: program.id.clone(),
        name: program.name.clone(),
        todays_workout: first,
    })
}

pub fn start_workout(stores: &mut AppStores, catalog: &Catalog, workout_id: &str) -> AppResult<Workout> {
    let workout = catalog
        .workout(workout_id)
        .ok_or_else(|| AppError::not_found(format!("Workout '{}'", workout_id)))?;
    stores.workout.set_current_workout(Some(workout.clone()))?;
    Ok(workout.clone())
}

/// Every planned set of the workout, done as prescribed
pub fn as_prescribed(workout: &Workout) -> Vec<CompletedExercise> {
    workout
        .exercises
        .iter()
        .map(|exercise| {
            let set = match exercise.reps.minimum_seconds() {
                Some(seconds) => CompletedSet {
                    reps: 0,
                    weight: None,
                    duration: Some(seconds),
                    completed: true,
                },
                None => CompletedSet {
                    reps: exercise.reps.minimum().unwrap_or(0),
                    weight: None,
                    duration: None,
                    completed: true,
                },
            };
            CompletedExercise {
                exercise_id: exercise.id.clone(),
                sets: vec![set; exercise.sets as usize],
                completed: true,
            }
        })
        .collect()
}

/// Record a finished workout. Without explicit exercises the workout counts as
/// done as prescribed.
pub async fn complete_workout(
    stores: &mut AppStores,
    services: &Services,
    catalog: &Catalog,
    workout_id: &str,
    duration_minutes: Option<u32>,
    exercises: Option<Vec<CompletedExercise>>,
    notes: Option<String>,
) -> AppResult<WorkoutSession> {
    let workout = catalog
        .workout(workout_id)
        .ok_or_else(|| AppError::not_found(format!("Workout '{}'", workout_id)))?;
    let user_id = current_user(stores)?.id.clone();

    let exercises = exercises.unwrap_or_else(|| as_prescribed(workout));
    if let Some(unknown) = exercises
        .iter()
        .find(|e| !workout.exercises.iter().any(|w| w.id == e.exercise_id))
    {
        return Err(AppError::InvalidInput(format!(
            "Exercise '{}' is not part of workout '{}'",
            unknown.exercise_id, workout.id
        )));
    }

    let mut session = WorkoutSession {
        id: String::new(),
        user_id,
        workout_id: workout.id.clone(),
        date: Utc::now(),
        completed: exercises.iter().all(|e| e.completed),
        exercises,
        duration: duration_minutes.or(Some(workout.estimated_duration)),
        notes,
    };
    session.id = services.tracking.save_workout_session(&session).await?;

    stores.workout.add_workout_session(session.clone())?;
    if stores.workout.get().current_workout.as_ref().map(|w| &w.id) == Some(&workout.id) {
        stores.workout.set_current_workout(None)?;
    }
    share(
        stores,
        services,
        ActivityData::WorkoutCompleted {
            workout_id: workout.id.clone(),
            duration_minutes: session.duration,
        },
    )
    .await;
    Ok(session)
}

/// Reload the user's sessions, newest first, into the workout store
pub async fn workout_history(
    stores: &mut AppStores,
    services: &Services,
    limit: Option<usize>,
) -> AppResult<Vec<WorkoutSession>> {
    let user_id = current_user(stores)?.id.clone();
    let sessions = services
        .tracking
        .get_user_workout_sessions(&user_id, Some(limit.unwrap_or(DEFAULT_HISTORY_LIMIT)))
        .await?;
    stores.workout.set_workout_sessions(sessions.clone())?;
    Ok(sessions)
}

// ============================================================================
// Progress
// ============================================================================

pub async fn record_progress(
    stores: &mut AppStores,
    services: &Services,
    input: ProgressInput,
) -> AppResult<ProgressEntry> {
    if input.weight.is_none() && input.body_fat.is_none() && input.measurements.is_none() {
        return Err(AppError::InvalidInput(
            "Provide a weight, a body fat percentage or measurements".to_string(),
        ));
    }
    if let Some(weight) = input.weight {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(AppError::InvalidInput("weight must be a positive number".to_string()));
        }
    }
    if let Some(body_fat) = input.body_fat {
        if !(body_fat.is_finite() && (0.0..=100.0).contains(&body_fat)) {
            return Err(AppError::InvalidInput(
                "body_fat must be a percentage between 0 and 100".to_string(),
            ));
        }
    }
    let user_id = current_user(stores)?.id.clone();

    let mut entry = ProgressEntry {
        id: String::new(),
        user_id,
        date: Utc::now(),
        weight: input.weight,
        body_fat: input.body_fat,
        measurements: input.measurements,
        photos: Vec::new(),
        notes: input.notes,
    };
    entry.id = services.tracking.save_progress_entry(&entry).await?;
    stores.progress.add_progress_entry(entry.clone())?;

    share(
        stores,
        services,
        ActivityData::ProgressUpdate {
            weight: entry.weight,
            body_fat: entry.body_fat,
        },
    )
    .await;
    Ok(entry)
}

/// Reload the user's check-ins, newest first, into the progress store
pub async fn progress_history(
    stores: &mut AppStores,
    services: &Services,
    limit: Option<usize>,
) -> AppResult<ProgressSummary> {
    let user_id = current_user(stores)?.id.clone();
    let entries = services
        .tracking
        .get_progress_entries(&user_id, Some(limit.unwrap_or(DEFAULT_HISTORY_LIMIT)))
        .await?;
    stores.progress.set_progress_entries(entries.clone())?;

    let progress = stores.progress.get();
    Ok(ProgressSummary {
        current_weight: progress.current_weight,
        current_body_fat: progress.current_body_fat,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::{FitnessGoal, UserCreate};
    use crate::store::storage::FlakyStorage;
    use crate::tools::test_support::services;

    async fn signed_in(services: &Services, stores: &mut AppStores, phone: &str) -> String {
        let user = services
            .users
            .create_user(UserCreate {
                phone_number: phone.to_string(),
                name: "Lee".to_string(),
                age: 29,
                weight: 64.0,
                height: 170.0,
                goal: FitnessGoal::WeightLoss,
            })
            .await
            .unwrap();
        stores.auth.set_user(Some(user.clone())).unwrap();
        stores.auth.set_authenticated(true).unwrap();
        user.id
    }

    #[tokio::test]
    async fn test_failed_rollover_still_starts_the_day_dry() {
        let services = services();
        let storage = Arc::new(FlakyStorage::default());
        let mut stores = AppStores::persistent(storage.clone());
        let user_id = signed_in(&services, &mut stores, "+15551119999").await;

        let yesterday = Utc::now() - chrono::Duration::days(1);
        stores
            .nutrition
            .set_daily_nutrition(Some(DailyNutrition::new("old".to_string(), user_id, yesterday)))
            .unwrap();
        stores.nutrition.set_water_intake(1500.0).unwrap();

        storage.fail(true);
        assert!(add_water(&mut stores, 250.0).is_err());
        assert_eq!(stores.nutrition.get().water_intake, 0.0);

        storage.fail(false);
        let summary = add_water(&mut stores, 250.0).unwrap();
        assert_eq!(summary.water_intake_ml, 250.0);
        assert_ne!(summary.log_id, "old");
    }

    #[test]
    fn test_failed_program_selection_is_not_half_applied() {
        let catalog = Catalog::builtin().unwrap();
        let storage = Arc::new(FlakyStorage::default());
        let mut stores = AppStores::persistent(storage.clone());

        storage.fail(true);
        assert!(select_program(&mut stores, &catalog, "prog_001").is_err());
        let state = stores.workout.get();
        assert_eq!(state.current_program.as_ref().unwrap().id, "prog_001");
        assert_eq!(state.todays_workout.as_ref().unwrap().id, "workout_001");
        assert!(stores.workout.is_dirty());
    }

    #[test]
    fn test_tools_need_a_user() {
        let mut stores = AppStores::in_memory();
        assert!(matches!(add_water(&mut stores, 250.0), Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_water_and_meals_fill_todays_log() {
        let services = services();
        let catalog = Catalog::builtin().unwrap();
        let mut stores = AppStores::in_memory();
        signed_in(&services, &mut stores, "+15551110000").await;

        add_water(&mut stores, 250.0).unwrap();
        let summary = add_water(&mut stores, 250.0).unwrap();
        assert_eq!(summary.water_intake_ml, 500.0);
        assert!(add_water(&mut stores, -5.0).is_err());

        select_meal_plan(&mut stores, &catalog, "plan_001").unwrap();
        let meal = catalog.meal("meal_002").unwrap();
        let summary = log_meal(&mut stores, &services, &catalog, "meal_002", 2.0)
            .await
            .unwrap();
        assert_eq!(summary.meals_logged, 1);
        assert_eq!(summary.total_calories, meal.calories * 2.0);
        assert!(summary.planned_calories.is_some());

        assert!(matches!(
            log_meal(&mut stores, &services, &catalog, "meal_404", 1.0).await,
            Err(AppError::NotFound(_))
        ));
        assert!(log_meal(&mut stores, &services, &catalog, "meal_002", 0.0)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_save_day_creates_then_updates() {
        let services = services();
        let mut stores = AppStores::in_memory();
        signed_in(&services, &mut stores, "+15551110001").await;

        add_water(&mut stores, 300.0).unwrap();
        let first = save_day(&mut stores, &services).await.unwrap();
        assert!(first.created);

        add_water(&mut stores, 200.0).unwrap();
        let second = save_day(&mut stores, &services).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.log_id, first.log_id);

        let date = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let saved = get_day(&stores, &services, &date).await.unwrap().unwrap();
        assert_eq!(saved.water_intake, 500.0);
        assert!(get_day(&stores, &services, "yesterday").await.is_err());
    }

    #[tokio::test]
    async fn test_complete_workout_as_prescribed() {
        let services = services();
        let catalog = Catalog::builtin().unwrap();
        let mut stores = AppStores::in_memory();
        signed_in(&services, &mut stores, "+15551110002").await;

        let selection = select_program(&mut stores, &catalog, "prog_001").unwrap();
        let workout = selection.todays_workout.unwrap();
        start_workout(&mut stores, &catalog, &workout.id).unwrap();

        let session = complete_workout(&mut stores, &services, &catalog, &workout.id, None, None, None)
            .await
            .unwrap();
        assert!(session.completed);
        assert_eq!(session.completed_sets() as u32, workout.total_sets());
        assert_eq!(session.duration, Some(workout.estimated_duration));
        assert!(stores.workout.get().current_workout.is_none());
        assert_eq!(stores.workout.get().workout_sessions[0].id, session.id);

        let history = workout_history(&mut stores, &services, None).await.unwrap();
        assert_eq!(history.len(), 1);

        let foreign = vec![CompletedExercise {
            exercise_id: "ex_999".to_string(),
            sets: Vec::new(),
            completed: true,
        }];
        assert!(matches!(
            complete_workout(&mut stores, &services, &catalog, &workout.id, None, Some(foreign), None)
                .await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_progress_updates_current_values() {
        let services = services();
        let mut stores = AppStores::in_memory();
        signed_in(&services, &mut stores, "+15551110003").await;

        assert!(record_progress(&mut stores, &services, ProgressInput::default())
            .await
            .is_err());
        record_progress(
            &mut stores,
            &services,
            ProgressInput {
                weight: Some(63.2),
                body_fat: Some(24.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let summary = progress_history(&mut stores, &services, Some(5)).await.unwrap();
        assert_eq!(summary.entries.len(), 1);
        assert_eq!(summary.current_weight, Some(63.2));
        assert_eq!(summary.current_body_fat, Some(24.0));
    }

    #[tokio::test]
    async fn test_family_members_see_shared_activity() {
        let services = services();
        let mut stores = AppStores::in_memory();
        let user_id = signed_in(&services, &mut stores, "+15551110004").await;
        let group = services
            .family
            .create_family_group("Lees", &user_id)
            .await
            .unwrap();
        let mut user = stores.auth.get().user.clone().unwrap();
        user.family_group_id = Some(group.id.clone());
        stores.auth.set_user(Some(user)).unwrap();

        let catalog = Catalog::builtin().unwrap();
        log_meal(&mut stores, &services, &catalog, "meal_001", 1.0)
            .await
            .unwrap();

        let feed = services
            .family
            .get_family_activities(&group.id, None)
            .await
            .unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].activity.kind(), "meal_logged");
        assert_eq!(stores.family.get().family_activities.len(), 1);
    }
}
