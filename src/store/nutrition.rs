//! Nutrition state

use serde::{Deserialize, Serialize};

use super::{Store, StoreError, StoreResult, StoreState};
use crate::models::{ConsumedMeal, DailyNutrition, Meal, MealPlan};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionState {
    pub current_meal_plan: Option<MealPlan>,
    pub daily_nutrition: Option<DailyNutrition>,
    pub water_intake: f64, // ml
}

impl StoreState for NutritionState {
    const NAME: &'static str = "nutrition";
    const STORAGE_KEY: Option<&'static str> = Some("nutrition-storage");
}

fn check_water_amount(amount: f64) -> StoreResult<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(StoreError::Validation(ValidationErrors::single(
            "amount",
            "Water amount must be a non-negative number",
        )))
    }
}

impl Store<NutritionState> {
    pub fn set_current_meal_plan(&mut self, plan: Option<MealPlan>) -> StoreResult<&NutritionState> {
        self.update(|s| s.current_meal_plan = plan)
    }

    pub fn set_daily_nutrition(
        &mut self,
        nutrition: Option<DailyNutrition>,
    ) -> StoreResult<&NutritionState> {
        self.update(|s| s.daily_nutrition = nutrition)
    }

    /// Begin a new day: the given log replaces the current one and water starts at zero
    pub fn start_day(&mut self, log: DailyNutrition) -> StoreResult<&NutritionState> {
        self.update(|s| {
            s.daily_nutrition = Some(log);
            s.water_intake = 0.0;
        })
    }

    pub fn set_water_intake(&mut self, intake: f64) -> StoreResult<&NutritionState> {
        self.try_update(|s| {
            check_water_amount(intake)?;
            s.water_intake = intake;
            Ok(())
        })
    }

    /// Add to today's water intake (ml)
    pub fn add_water(&mut self, amount: f64) -> StoreResult<&NutritionState> {
        self.try_update(|s| {
            check_water_amount(amount)?;
            s.water_intake += amount;
            Ok(())
        })
    }

    /// Append a consumed meal to the day's log and add its calories and macros,
    /// scaled by servings. Without a daily log nothing changes.
    pub fn log_meal(&mut self, entry: ConsumedMeal, meal: &Meal) -> StoreResult<&NutritionState> {
        if self.get().daily_nutrition.is_none() {
            return Ok(self.get());
        }
        let calories = meal.calories * entry.servings;
        let macros = meal.macros * entry.servings;
        self.update(|s| {
            if let Some(log) = s.daily_nutrition.as_mut() {
                log.meals.push(entry);
                log.total_calories += calories;
                log.total_macros = log.total_macros + macros;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::catalog::Catalog;

    fn consumed(meal_id: &str, servings: f64) -> ConsumedMeal {
        ConsumedMeal {
            meal_id: meal_id.to_string(),
            servings,
            consumed: true,
            time: None,
        }
    }

    #[test]
    fn test_add_water_rejects_bad_amounts() {
        let mut store: Store<NutritionState> = Store::new();
        store.add_water(250.0).unwrap();
        assert!(matches!(
            store.add_water(-10.0),
            Err(StoreError::Validation(_))
        ));
        assert!(store.add_water(f64::NAN).is_err());
        assert_eq!(store.get().water_intake, 250.0);

        store.set_water_intake(0.0).unwrap();
        assert_eq!(store.get().water_intake, 0.0);
    }

    #[test]
    fn test_start_day_resets_water() {
        let mut store: Store<NutritionState> = Store::new();
        store.add_water(900.0).unwrap();
        store
            .start_day(DailyNutrition::new("d2".to_string(), "u1".to_string(), Utc::now()))
            .unwrap();
        let state = store.get();
        assert_eq!(state.water_intake, 0.0);
        assert_eq!(state.daily_nutrition.as_ref().unwrap().id, "d2");
    }

    #[test]
    fn test_log_meal_updates_totals() {
        let catalog = Catalog::builtin().unwrap();
        let parfait = catalog.meal("meal_002").unwrap();
        let smoothie = catalog.meal("meal_006").unwrap();

        let mut store: Store<NutritionState> = Store::new();
        store
            .set_daily_nutrition(Some(DailyNutrition::new(
                "d1".to_string(),
                "u1".to_string(),
                Utc::now(),
            )))
            .unwrap();
        store.log_meal(consumed("meal_002", 1.0), parfait).unwrap();
        store.log_meal(consumed("meal_006", 2.0), smoothie).unwrap();

        let log = store.get().daily_nutrition.as_ref().unwrap();
        assert_eq!(log.meals.len(), 2);
        assert_eq!(log.total_calories, 780.0);
        assert_eq!(log.total_macros.protein, 60.0);
    }

    #[test]
    fn test_log_meal_without_daily_log_is_ignored() {
        let catalog = Catalog::builtin().unwrap();
        let mut store: Store<NutritionState> = Store::new();
        store
            .log_meal(consumed("meal_001", 1.0), catalog.meal("meal_001").unwrap())
            .unwrap();
        assert!(store.get().daily_nutrition.is_none());
    }
}
