//! Meal catalog models
//!
//! Ingredients, meals and meal plans.

use serde::{Deserialize, Serialize};

use super::{FitnessGoal, FitnessLevel, Macros};

/// A catalog ingredient at its reference amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub calories: f64,
    pub macros: Macros,
}

/// Meal type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

/// A meal with its ingredients in preparation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub calories: f64,
    pub macros: Macros,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub prep_time: u32,  // minutes
    pub cook_time: u32,  // minutes
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Meal {
    /// Preparation plus cooking time in minutes
    pub fn total_time(&self) -> u32 {
        self.prep_time + self.cook_time
    }
}

/// A daily meal plan for a goal and level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub goal: FitnessGoal,
    pub level: FitnessLevel,
    pub daily_calories: f64,
    pub macros: Macros,
    pub meals: Vec<Meal>,
}

impl MealPlan {
    /// Calories of the plan's meals, which may differ from the daily target
    pub fn planned_calories(&self) -> f64 {
        self.meals.iter().map(|m| m.calories).sum()
    }

    pub fn planned_macros(&self) -> Macros {
        self.meals.iter().map(|m| m.macros).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(id: &str, calories: f64, macros: Macros) -> Meal {
        Meal {
            id: id.to_string(),
            name: id.to_string(),
            meal_type: MealType::Snack,
            calories,
            macros,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            prep_time: 5,
            cook_time: 10,
            servings: 1,
            image_url: None,
        }
    }

    #[test]
    fn test_planned_totals() {
        let plan = MealPlan {
            id: "plan_x".to_string(),
            goal: FitnessGoal::Maintenance,
            level: FitnessLevel::Beginner,
            daily_calories: 2000.0,
            macros: Macros::new(100.0, 200.0, 60.0),
            meals: vec![
                meal("a", 280.0, Macros::new(20.0, 35.0, 8.0)),
                meal("b", 250.0, Macros::new(20.0, 25.0, 8.0)),
            ],
        };
        assert_eq!(plan.planned_calories(), 530.0);
        assert_eq!(plan.planned_macros().carbs, 60.0);
    }

    #[test]
    fn test_meal_serializes_type_field() {
        let json = serde_json::to_value(meal("m", 1.0, Macros::zero())).unwrap();
        assert_eq!(json["type"], "snack");
        assert_eq!(json["prepTime"], 5);
        assert!(json.get("imageUrl").is_none());
        assert_eq!(meal("m", 1.0, Macros::zero()).total_time(), 15);
    }
}
