//! Static catalog
//!
//! Read-only tables of ingredients, meals, meal plans, exercises and workout programs.
//! Tables are declared as definitions that reference each other by id; building the
//! catalog resolves every reference once and fails on duplicate or dangling ids.

mod nutrition_data;
pub mod query;
mod workout_data;

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{
    Exercise, ExerciseCategory, FitnessGoal, FitnessLevel, Ingredient, Macros, Meal, MealPlan,
    MealType, Reps, Workout, WorkoutProgram,
};

pub use query::{find_by_id, Identified};

/// Catalog construction errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("duplicate id '{id}' in {table}")]
    DuplicateId { table: &'static str, id: String },

    #[error("{table} entry '{owner}' references unknown {target} '{missing}'")]
    DanglingReference {
        table: &'static str,
        owner: String,
        target: &'static str,
        missing: String,
    },
}

pub struct IngredientDef {
    pub id: &'static str,
    pub name: &'static str,
    pub amount: f64,
    pub unit: &'static str,
    pub calories: f64,
    pub macros: Macros,
}

pub struct MealDef {
    pub id: &'static str,
    pub name: &'static str,
    pub meal_type: MealType,
    pub calories: f64,
    pub macros: Macros,
    pub ingredients: &'static [&'static str],
    pub instructions: &'static [&'static str],
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub image_url: Option<&'static str>,
}

pub struct MealPlanDef {
    pub id: &'static str,
    pub goal: FitnessGoal,
    pub level: FitnessLevel,
    pub daily_calories: f64,
    pub macros: Macros,
    pub meals: &'static [&'static str],
}

pub enum RepsDef {
    Count(u32),
    Text(&'static str),
}

pub struct ExerciseDef {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ExerciseCategory,
    pub sets: u32,
    pub reps: RepsDef,
    pub rest_time: u32,
    pub instructions: &'static [&'static str],
    pub muscle_groups: &'static [&'static str],
    pub equipment: &'static [&'static str],
    pub animation_url: Option<&'static str>,
}

pub struct WorkoutDef {
    pub id: &'static str,
    pub name: &'static str,
    pub day: u32,
    pub week: u32,
    pub estimated_duration: u32,
    pub exercises: &'static [&'static str],
}

pub struct ProgramDef {
    pub id: &'static str,
    pub name: &'static str,
    pub goal: FitnessGoal,
    pub level: FitnessLevel,
    pub duration: u32,
    pub description: &'static str,
    pub workouts: &'static [WorkoutDef],
}

/// Full set of catalog definitions
pub struct CatalogDefinitions<'a> {
    pub ingredients: &'a [IngredientDef],
    pub meals: &'a [MealDef],
    pub meal_plans: &'a [MealPlanDef],
    pub exercises: &'a [ExerciseDef],
    pub programs: &'a [ProgramDef],
}

/// The resolved, immutable catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
    meals: Vec<Meal>,
    meal_plans: Vec<MealPlan>,
    exercises: Vec<Exercise>,
    programs: Vec<WorkoutProgram>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Index ids of a table, rejecting duplicates
fn unique_index<'a>(
    table: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashMap<&'a str, usize>, CatalogError> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        if index.insert(id, position).is_some() {
            return Err(CatalogError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    Ok(index)
}

/// Resolve a list of references against an already built table
fn resolve<T: Clone>(
    table: &'static str,
    owner: &str,
    target: &'static str,
    refs: &[&str],
    index: &HashMap<&str, usize>,
    items: &[T],
) -> Result<Vec<T>, CatalogError> {
    refs.iter()
        .map(|id| {
            index
                .get(id)
                .map(|&pos| items[pos].clone())
                .ok_or_else(|| CatalogError::DanglingReference {
                    table,
                    owner: owner.to_string(),
                    target,
                    missing: id.to_string(),
                })
        })
        .collect()
}

impl Catalog {
    /// Build the catalog shipped with the app
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_definitions(&CatalogDefinitions {
            ingredients: nutrition_data::INGREDIENTS,
            meals: nutrition_data::MEALS,
            meal_plans: nutrition_data::MEAL_PLANS,
            exercises: workout_data::EXERCISES,
            programs: workout_data::PROGRAMS,
        })
    }

    /// Build a catalog from definitions, resolving all cross references
    pub fn from_definitions(defs: &CatalogDefinitions<'_>) -> Result<Self, CatalogError> {
        let ingredient_index = unique_index("ingredients", defs.ingredients.iter().map(|d| d.id))?;
        let ingredients: Vec<Ingredient> = defs
            .ingredients
            .iter()
            .map(|d| Ingredient {
                id: d.id.to_string(),
                name: d.name.to_string(),
                amount: d.amount,
                unit: d.unit.to_string(),
                calories: d.calories,
                macros: d.macros,
            })
            .collect();

        let meal_index = unique_index("meals", defs.meals.iter().map(|d| d.id))?;
        let meals = defs
            .meals
            .iter()
            .map(|d| {
                Ok(Meal {
                    id: d.id.to_string(),
                    name: d.name.to_string(),
                    meal_type: d.meal_type,
                    calories: d.calories,
                    macros: d.macros,
                    ingredients: resolve(
                        "meals",
                        d.id,
                        "ingredient",
                        d.ingredients,
                        &ingredient_index,
                        &ingredients,
                    )?,
                    instructions: strings(d.instructions),
                    prep_time: d.prep_time,
                    cook_time: d.cook_time,
                    servings: d.servings,
                    image_url: d.image_url.map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        unique_index("meal_plans", defs.meal_plans.iter().map(|d| d.id))?;
        let meal_plans = defs
            .meal_plans
            .iter()
            .map(|d| {
                Ok(MealPlan {
                    id: d.id.to_string(),
                    goal: d.goal,
                    level: d.level,
                    daily_calories: d.daily_calories,
                    macros: d.macros,
                    meals: resolve("meal_plans", d.id, "meal", d.meals, &meal_index, &meals)?,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let exercise_index = unique_index("exercises", defs.exercises.iter().map(|d| d.id))?;
        let exercises: Vec<Exercise> = defs
            .exercises
            .iter()
            .map(|d| Exercise {
                id: d.id.to_string(),
                name: d.name.to_string(),
                category: d.category,
                sets: d.sets,
                reps: match d.reps {
                    RepsDef::Count(n) => Reps::Count(n),
                    RepsDef::Text(text) => Reps::Text(text.to_string()),
                },
                rest_time: d.rest_time,
                instructions: strings(d.instructions),
                muscle_groups: strings(d.muscle_groups),
                equipment: strings(d.equipment),
                video_url: None,
                animation_url: d.animation_url.map(str::to_string),
            })
            .collect();

        unique_index("programs", defs.programs.iter().map(|d| d.id))?;
        // Workout ids are unique across all programs
        unique_index(
            "workouts",
            defs.programs
                .iter()
                .flat_map(|p| p.workouts.iter().map(|w| w.id)),
        )?;
        let programs = defs
            .programs
            .iter()
            .map(|p| {
                let workouts = p
                    .workouts
                    .iter()
                    .map(|w| {
                        Ok(Workout {
                            id: w.id.to_string(),
                            name: w.name.to_string(),
                            day: w.day,
                            week: w.week,
                            exercises: resolve(
                                "workouts",
                                w.id,
                                "exercise",
                                w.exercises,
                                &exercise_index,
                                &exercises,
                            )?,
                            estimated_duration: w.estimated_duration,
                        })
                    })
                    .collect::<Result<Vec<_>, CatalogError>>()?;

                Ok(WorkoutProgram {
                    id: p.id.to_string(),
                    name: p.name.to_string(),
                    goal: p.goal,
                    level: p.level,
                    duration: p.duration,
                    description: p.description.to_string(),
                    workouts,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let catalog = Self {
            ingredients,
            meals,
            meal_plans,
            exercises,
            programs,
        };

        tracing::debug!(
            ingredients = catalog.ingredients.len(),
            meals = catalog.meals.len(),
            meal_plans = catalog.meal_plans.len(),
            exercises = catalog.exercises.len(),
            programs = catalog.programs.len(),
            "catalog built"
        );

        Ok(catalog)
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn meal_plans(&self) -> &[MealPlan] {
        &self.meal_plans
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn programs(&self) -> &[WorkoutProgram] {
        &self.programs
    }

    /// All workouts across programs, in program order
    pub fn workouts(&self) -> impl Iterator<Item = &Workout> {
        self.programs.iter().flat_map(|p| p.workouts.iter())
    }
}
