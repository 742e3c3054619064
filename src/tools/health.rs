//! Health calculator tools
//!
//! BMI, calories burned and the daily water goal. Missing body measurements
//! fall back to the latest progress entry, then to the signed-in user's profile.

use serde::Serialize;

use crate::calculations::{
    calculate_bmi, calculate_calories_burned, met_value, water_intake_goal, ActivityLevel,
    BmiCategory,
};
use crate::error::{AppError, AppResult};
use crate::store::AppStores;

#[derive(Debug, Serialize)]
pub struct BmiResponse {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub bmi: f64,
    pub category: BmiCategory,
    pub category_label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CaloriesBurnedResponse {
    pub activity: String,
    pub met: f64,
    pub duration_minutes: f64,
    pub weight_kg: f64,
    pub calories: f64,
}

#[derive(Debug, Serialize)]
pub struct WaterGoalResponse {
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal_ml: f64,
    pub consumed_ml: f64,
    pub remaining_ml: f64,
}

fn positive(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AppError::InvalidInput(format!("{} must be a positive number", field)))
    }
}

fn resolve_weight(stores: &AppStores, weight_kg: Option<f64>) -> AppResult<f64> {
    let weight = weight_kg
        .or(stores.progress.get().current_weight)
        .or_else(|| stores.auth.get().user.as_ref().and_then(|u| u.weight))
        .ok_or_else(|| {
            AppError::InvalidInput("weight_kg is required when no weight is on record".to_string())
        })?;
    positive("weight_kg", weight)
}

fn resolve_height(stores: &AppStores, height_cm: Option<f64>) -> AppResult<f64> {
    let height = height_cm
        .or_else(|| stores.auth.get().user.as_ref().and_then(|u| u.height))
        .ok_or_else(|| {
            AppError::InvalidInput("height_cm is required when no height is on record".to_string())
        })?;
    positive("height_cm", height)
}

pub fn bmi(stores: &AppStores, weight_kg: Option<f64>, height_cm: Option<f64>) -> AppResult<BmiResponse> {
    let weight_kg = resolve_weight(stores, weight_kg)?;
    let height_cm = resolve_height(stores, height_cm)?;
    let bmi = calculate_bmi(weight_kg, height_cm);
    let category = BmiCategory::from_bmi(bmi);
    Ok(BmiResponse {
        weight_kg,
        height_cm,
        bmi: (bmi * 10.0).round() / 10.0,
        category,
        category_label: category.label(),
    })
}

pub fn calories_burned(
    stores: &AppStores,
    activity: &str,
    duration_minutes: f64,
    weight_kg: Option<f64>,
) -> AppResult<CaloriesBurnedResponse> {
    let duration_minutes = positive("duration_minutes", duration_minutes)?;
    let weight_kg = resolve_weight(stores, weight_kg)?;
    Ok(CaloriesBurnedResponse {
        activity: activity.trim().to_lowercase(),
        met: met_value(activity),
        duration_minutes,
        weight_kg,
        calories: calculate_calories_burned(activity, duration_minutes, weight_kg),
    })
}

/// Daily goal against what the nutrition store has recorded so far
pub fn water_goal(
    stores: &AppStores,
    weight_kg: Option<f64>,
    activity_level: Option<&str>,
) -> AppResult<WaterGoalResponse> {
    let weight_kg = resolve_weight(stores, weight_kg)?;
    let activity_level = match activity_level {
        Some(raw) => ActivityLevel::from_str(raw).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Unknown activity level '{}'. Use low, moderate or high",
                raw
            ))
        })?,
        None => ActivityLevel::default(),
    };
    let goal_ml = water_intake_goal(weight_kg, activity_level);
    let consumed_ml = stores.nutrition.get().water_intake;
    Ok(WaterGoalResponse {
        weight_kg,
        activity_level,
        goal_ml,
        consumed_ml,
        remaining_ml: (goal_ml - consumed_ml).max(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_needs_measurements() {
        let mut stores = AppStores::in_memory();
        assert!(matches!(bmi(&stores, None, Some(175.0)), Err(AppError::InvalidInput(_))));

        stores.progress.set_current_weight(Some(70.0)).unwrap();
        let result = bmi(&stores, None, Some(175.0)).unwrap();
        assert_eq!(result.bmi, 22.9);
        assert_eq!(result.category_label, "Normal weight");

        assert!(bmi(&stores, Some(-1.0), Some(175.0)).is_err());
    }

    #[test]
    fn test_calories_burned() {
        let stores = AppStores::in_memory();
        let result = calories_burned(&stores, "Running", 30.0, Some(70.0)).unwrap();
        assert_eq!(result.met, 8.0);
        assert_eq!(result.calories, 280.0);
        assert!(calories_burned(&stores, "running", 0.0, Some(70.0)).is_err());
    }

    #[test]
    fn test_water_goal_tracks_intake() {
        let mut stores = AppStores::in_memory();
        stores.nutrition.add_water(500.0).unwrap();
        let goal = water_goal(&stores, Some(80.0), Some("moderate")).unwrap();
        assert_eq!(goal.goal_ml, 3360.0);
        assert_eq!(goal.consumed_ml, 500.0);
        assert_eq!(goal.remaining_ml, 2860.0);

        assert!(water_goal(&stores, Some(80.0), Some("extreme")).is_err());
        assert_eq!(water_goal(&stores, Some(80.0), None).unwrap().goal_ml, 2800.0);
    }
}
