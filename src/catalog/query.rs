//! Catalog queries
//!
//! Side-effect-free filters and lookups. Filters keep catalog order and return an empty
//! vector when nothing matches; lookups return `None` for unknown ids.

use super::Catalog;
use crate::models::{
    Exercise, FitnessGoal, FitnessLevel, Ingredient, Meal, MealPlan, Workout, WorkoutProgram,
};

/// Catalog entities addressable by id
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

impl_identified!(Ingredient, Meal, MealPlan, Exercise, Workout, WorkoutProgram);

/// Linear scan of a table by id
pub fn find_by_id<'a, T: Identified>(table: &'a [T], id: &str) -> Option<&'a T> {
    table.iter().find(|item| item.id() == id)
}

impl Catalog {
    pub fn meal_plans_by_goal(&self, goal: FitnessGoal) -> Vec<&MealPlan> {
        self.meal_plans().iter().filter(|p| p.goal == goal).collect()
    }

    pub fn meal_plans_by_level(&self, level: FitnessLevel) -> Vec<&MealPlan> {
        self.meal_plans().iter().filter(|p| p.level == level).collect()
    }

    /// Workout programs for a goal
    pub fn workouts_by_goal(&self, goal: FitnessGoal) -> Vec<&WorkoutProgram> {
        self.programs().iter().filter(|p| p.goal == goal).collect()
    }

    /// Workout programs for a level
    pub fn workouts_by_level(&self, level: FitnessLevel) -> Vec<&WorkoutProgram> {
        self.programs().iter().filter(|p| p.level == level).collect()
    }

    pub fn meal_plan(&self, id: &str) -> Option<&MealPlan> {
        find_by_id(self.meal_plans(), id)
    }

    pub fn meal(&self, id: &str) -> Option<&Meal> {
        find_by_id(self.meals(), id)
    }

    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        find_by_id(self.ingredients(), id)
    }

    pub fn workout_program(&self, id: &str) -> Option<&WorkoutProgram> {
        find_by_id(self.programs(), id)
    }

    /// Workout by id, searched across all programs
    pub fn workout(&self, id: &str) -> Option<&Workout> {
        self.workouts().find(|w| w.id == id)
    }

    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        find_by_id(self.exercises(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<T: Identified>(items: &[&T]) -> Vec<String> {
        items.iter().map(|i| i.id().to_string()).collect()
    }

    #[test]
    fn test_meal_plans_by_goal_partition_catalog() {
        let catalog = Catalog::builtin().unwrap();
        let mut seen: Vec<String> = Vec::new();
        for goal in FitnessGoal::ALL {
            let plans = catalog.meal_plans_by_goal(goal);
            assert!(plans.iter().all(|p| p.goal == goal));
            seen.extend(ids(&plans));
        }
        seen.sort();
        let mut all: Vec<String> = catalog.meal_plans().iter().map(|p| p.id.clone()).collect();
        all.sort();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_weight_loss_plans_in_catalog_order() {
        let catalog = Catalog::builtin().unwrap();
        let plans = catalog.meal_plans_by_goal(FitnessGoal::WeightLoss);
        assert_eq!(ids(&plans), vec!["plan_001", "plan_002"]);
    }

    #[test]
    fn test_level_filters() {
        let catalog = Catalog::builtin().unwrap();
        let advanced = catalog.meal_plans_by_level(FitnessLevel::Advanced);
        assert_eq!(ids(&advanced), vec!["plan_004"]);

        let beginner = catalog.workouts_by_level(FitnessLevel::Beginner);
        assert_eq!(ids(&beginner), vec!["prog_001", "prog_003"]);

        let weight_loss = catalog.workouts_by_goal(FitnessGoal::WeightLoss);
        assert_eq!(ids(&weight_loss), vec!["prog_001", "prog_002"]);
    }

    #[test]
    fn test_find_by_id_is_total() {
        let catalog = Catalog::builtin().unwrap();
        for meal in catalog.meals() {
            assert_eq!(find_by_id(catalog.meals(), &meal.id), Some(meal));
        }
        assert!(find_by_id(catalog.meals(), "meal_999").is_none());
        assert!(find_by_id(catalog.meals(), "").is_none());
        assert!(find_by_id::<Meal>(&[], "meal_001").is_none());
    }

    #[test]
    fn test_typed_lookups() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.ingredient("ing_004").unwrap().name, "Greek Yogurt");
        assert_eq!(catalog.meal("meal_007").unwrap().servings, 4);
        assert_eq!(catalog.meal_plan("plan_003").unwrap().meals.len(), 5);
        assert_eq!(catalog.workout_program("prog_005").unwrap().name, "Core Shredder");
        assert_eq!(catalog.workout("workout_006").unwrap().name, "Lower Body Mass");
        assert_eq!(catalog.exercise("ex_010").unwrap().equipment, vec!["wall"]);
        assert!(catalog.workout("workout_010").is_none());
    }

    #[test]
    fn test_queries_are_idempotent() {
        let catalog = Catalog::builtin().unwrap();
        let first: Vec<MealPlan> = catalog
            .meal_plans_by_goal(FitnessGoal::Maintenance)
            .into_iter()
            .cloned()
            .collect();
        let second: Vec<MealPlan> = catalog
            .meal_plans_by_goal(FitnessGoal::Maintenance)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(first, second);
        assert_eq!(catalog.meal_plans().len(), 6);
    }
}
