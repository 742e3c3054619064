//! Catalog Tools
//!
//! Browsing meal plans, meals, workout programs and exercises.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::models::{
    Exercise, FitnessGoal, FitnessLevel, Macros, Meal, MealPlan, Workout, WorkoutProgram,
};

/// Meal plan row for listings
#[derive(Debug, Serialize)]
pub struct MealPlanSummary {
    pub id: String,
    pub goal: FitnessGoal,
    pub goal_name: &'static str,
    pub level: FitnessLevel,
    pub daily_calories: f64,
    pub macros: Macros,
    pub meal_count: usize,
}

impl From<&MealPlan> for MealPlanSummary {
    fn from(plan: &MealPlan) -> Self {
        Self {
            id: plan.id.clone(),
            goal: plan.goal,
            goal_name: plan.goal.display_name(),
            level: plan.level,
            daily_calories: plan.daily_calories,
            macros: plan.macros,
            meal_count: plan.meals.len(),
        }
    }
}

/// Full meal plan with what its meals actually add up to
#[derive(Debug, Serialize)]
pub struct MealPlanDetail {
    #[serde(flatten)]
    pub plan: MealPlan,
    pub planned_calories: f64,
    pub planned_macros: Macros,
}

/// Workout program row for listings
#[derive(Debug, Serialize)]
pub struct ProgramSummary {
    pub id: String,
    pub name: String,
    pub goal: FitnessGoal,
    pub level: FitnessLevel,
    pub duration_weeks: u32,
    pub description: String,
    pub workout_count: usize,
}

impl From<&WorkoutProgram> for ProgramSummary {
    fn from(program: &WorkoutProgram) -> Self {
        Self {
            id: program.id.clone(),
            name: program.name.clone(),
            goal: program.goal,
            level: program.level,
            duration_weeks: program.duration,
            description: program.description.clone(),
            workout_count: program.workouts.len(),
        }
    }
}

/// Workout with its set count
#[derive(Debug, Serialize)]
pub struct WorkoutDetail {
    #[serde(flatten)]
    pub workout: Workout,
    pub total_sets: u32,
}

pub fn parse_goal(raw: &str) -> AppResult<FitnessGoal> {
    FitnessGoal::from_str(raw).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Unknown goal '{}'. Use one of: weight_loss, weight_gain, bulking, abs_cutting, maintenance",
            raw
        ))
    })
}

pub fn parse_level(raw: &str) -> AppResult<FitnessLevel> {
    FitnessLevel::from_str(raw).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Unknown level '{}'. Use one of: beginner, intermediate, advanced",
            raw
        ))
    })
}

/// Keep the items of `base` that are also in `other`, in `base` order
fn intersect<'a, T>(base: Vec<&'a T>, other: &[&'a T]) -> Vec<&'a T> {
    base.into_iter()
        .filter(|item| other.iter().any(|o| std::ptr::eq(*o, *item)))
        .collect()
}

// ============================================================================
// Meal Plans
// ============================================================================

/// List meal plans, optionally filtered by goal and/or level
pub fn list_meal_plans(
    catalog: &Catalog,
    goal: Option<&str>,
    level: Option<&str>,
) -> AppResult<Vec<MealPlanSummary>> {
    let goal = goal.map(parse_goal).transpose()?;
    let level = level.map(parse_level).transpose()?;

    let plans: Vec<&MealPlan> = match (goal, level) {
        (Some(goal), Some(level)) => intersect(
            catalog.meal_plans_by_goal(goal),
            &catalog.meal_plans_by_level(level),
        ),
        (Some(goal), None) => catalog.meal_plans_by_goal(goal),
        (None, Some(level)) => catalog.meal_plans_by_level(level),
        (None, None) => catalog.meal_plans().iter().collect(),
    };

    Ok(plans.into_iter().map(MealPlanSummary::from).collect())
}

pub fn get_meal_plan(catalog: &Catalog, id: &str) -> Option<MealPlanDetail> {
    catalog.meal_plan(id).map(|plan| MealPlanDetail {
        planned_calories: plan.planned_calories(),
        planned_macros: plan.planned_macros(),
        plan: plan.clone(),
    })
}

pub fn get_meal(catalog: &Catalog, id: &str) -> Option<Meal> {
    catalog.meal(id).cloned()
}

// ============================================================================
// Workouts
// ============================================================================

/// List workout programs, optionally filtered by goal and/or level
pub fn list_workout_programs(
    catalog: &Catalog,
    goal: Option<&str>,
    level: Option<&str>,
) -> AppResult<Vec<ProgramSummary>> {
    let goal = goal.map(parse_goal).transpose()?;
    let level = level.map(parse_level).transpose()?;

    let programs: Vec<&WorkoutProgram> = match (goal, level) {
        (Some(goal), Some(level)) => intersect(
            catalog.workouts_by_goal(goal),
            &catalog.workouts_by_level(level),
        ),
        (Some(goal), None) => catalog.workouts_by_goal(goal),
        (None, Some(level)) => catalog.workouts_by_level(level),
        (None, None) => catalog.programs().iter().collect(),
    };

    Ok(programs.into_iter().map(ProgramSummary::from).collect())
}

pub fn get_workout_program(catalog: &Catalog, id: &str) -> Option<WorkoutProgram> {
    catalog.workout_program(id).cloned()
}

pub fn get_workout(catalog: &Catalog, id: &str) -> Option<WorkoutDetail> {
    catalog.workout(id).map(|workout| WorkoutDetail {
        total_sets: workout.total_sets(),
        workout: workout.clone(),
    })
}

pub fn get_exercise(catalog: &Catalog, id: &str) -> Option<Exercise> {
    catalog.exercise(id).cloned()
}

/// Exercises, optionally only those working a muscle group
pub fn list_exercises(catalog: &Catalog, muscle_group: Option<&str>) -> Vec<Exercise> {
    catalog
        .exercises()
        .iter()
        .filter(|e| muscle_group.map_or(true, |m| e.targets(m)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|i| id(i).to_string()).collect()
    }

    #[test]
    fn test_list_meal_plans_filters() {
        let catalog = Catalog::builtin().unwrap();

        let all = list_meal_plans(&catalog, None, None).unwrap();
        assert_eq!(all.len(), catalog.meal_plans().len());

        let loss = list_meal_plans(&catalog, Some("weight_loss"), None).unwrap();
        assert_eq!(ids(&loss, |p| p.id.as_str()), vec!["plan_001", "plan_002"]);
        assert_eq!(loss[0].goal_name, "Weight Loss");

        let advanced = list_meal_plans(&catalog, None, Some("advanced")).unwrap();
        assert_eq!(ids(&advanced, |p| p.id.as_str()), vec!["plan_004"]);

        let both = list_meal_plans(&catalog, Some("weight_loss"), Some("advanced")).unwrap();
        assert!(both.is_empty());
    }

    #[test]
    fn test_unknown_filter_is_invalid_input() {
        let catalog = Catalog::builtin().unwrap();
        assert!(matches!(
            list_meal_plans(&catalog, Some("cardio"), None),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            list_workout_programs(&catalog, None, Some("expert")),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_list_workout_programs_filters() {
        let catalog = Catalog::builtin().unwrap();
        let beginner = list_workout_programs(&catalog, None, Some("beginner")).unwrap();
        assert_eq!(ids(&beginner, |p| p.id.as_str()), vec!["prog_001", "prog_003"]);

        let loss_beginner =
            list_workout_programs(&catalog, Some("weight_loss"), Some("beginner")).unwrap();
        assert_eq!(ids(&loss_beginner, |p| p.id.as_str()), vec!["prog_001"]);
    }

    #[test]
    fn test_lookups() {
        let catalog = Catalog::builtin().unwrap();
        let plan = get_meal_plan(&catalog, "plan_001").unwrap();
        assert_eq!(plan.planned_calories, plan.plan.planned_calories());
        assert!(get_meal_plan(&catalog, "plan_999").is_none());
        assert!(get_meal(&catalog, "meal_002").is_some());
        assert!(get_exercise(&catalog, "ex_999").is_none());

        let program = get_workout_program(&catalog, "prog_001").unwrap();
        let first = &program.workouts[0];
        let detail = get_workout(&catalog, &first.id).unwrap();
        assert_eq!(detail.total_sets, first.total_sets());
    }

    #[test]
    fn test_list_exercises_by_muscle_group() {
        let catalog = Catalog::builtin().unwrap();
        let all = list_exercises(&catalog, None);
        assert_eq!(all.len(), catalog.exercises().len());
        let group = &all[0].muscle_groups[0];
        let targeted = list_exercises(&catalog, Some(&group.to_uppercase()));
        assert!(!targeted.is_empty());
        assert!(targeted.iter().all(|e| e.targets(group)));
    }
}
