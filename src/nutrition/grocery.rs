//! Grocery list aggregation
//!
//! Flattens the ingredients of a meal plan into one shopping list. Repeated
//! ingredients are merged by id and their amounts summed; the list keeps the
//! order in which ingredients were first seen.

use std::collections::HashMap;

use thiserror::Error;

use super::units::convert_amount;
use crate::models::{Ingredient, Meal, MealPlan};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroceryError {
    #[error("ingredient '{ingredient_id}' ({name}) is listed in '{expected}' and in '{found}', which cannot be added together")]
    IncompatibleUnit {
        ingredient_id: String,
        name: String,
        expected: String,
        found: String,
    },
}

/// Build the shopping list for a meal plan
pub fn generate_grocery_list(plan: &MealPlan) -> Result<Vec<Ingredient>, GroceryError> {
    let list = aggregate_ingredients(&plan.meals)?;
    tracing::debug!(plan = %plan.id, items = list.len(), "grocery list generated");
    Ok(list)
}

/// Merge the ingredients of the given meals, in meal order then ingredient order.
///
/// The first occurrence of an id becomes the accumulator and fixes the unit; later
/// occurrences are converted into that unit when both are plain weight or volume
/// units, and rejected otherwise.
pub fn aggregate_ingredients<'a, I>(meals: I) -> Result<Vec<Ingredient>, GroceryError>
where
    I: IntoIterator<Item = &'a Meal>,
{
    let mut list: Vec<Ingredient> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for meal in meals {
        for ingredient in &meal.ingredients {
            match positions.get(&ingredient.id) {
                Some(&pos) => {
                    let acc = &mut list[pos];
                    let amount = convert_amount(ingredient.amount, &ingredient.unit, &acc.unit)
                        .ok_or_else(|| GroceryError::IncompatibleUnit {
                            ingredient_id: acc.id.clone(),
                            name: acc.name.clone(),
                            expected: acc.unit.clone(),
                            found: ingredient.unit.clone(),
                        })?;
                    acc.amount += amount;
                }
                None => {
                    positions.insert(ingredient.id.clone(), list.len());
                    list.push(ingredient.clone());
                }
            }
        }
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{Macros, MealType};

    fn ingredient(id: &str, amount: f64, unit: &str) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: id.to_uppercase(),
            amount,
            unit: unit.to_string(),
            calories: 10.0,
            macros: Macros::new(1.0, 1.0, 1.0),
        }
    }

    fn meal(id: &str, ingredients: Vec<Ingredient>) -> Meal {
        Meal {
            id: id.to_string(),
            name: id.to_string(),
            meal_type: MealType::Lunch,
            calories: 100.0,
            macros: Macros::zero(),
            ingredients,
            instructions: Vec::new(),
            prep_time: 0,
            cook_time: 0,
            servings: 1,
            image_url: None,
        }
    }

    #[test]
    fn test_plan_001_merges_shared_ingredients() {
        let catalog = Catalog::builtin().unwrap();
        let plan = catalog.meal_plan("plan_001").unwrap();
        let list = generate_grocery_list(plan).unwrap();

        let ids: Vec<&str> = list.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "ing_004", "ing_016", "ing_008", "ing_006", "ing_010", "ing_011", "ing_012",
                "ing_002", "ing_007", "ing_009", "ing_014", "ing_015",
            ]
        );

        let yogurt = list.iter().find(|i| i.id == "ing_004").unwrap();
        assert_eq!(yogurt.amount, 200.0);
        assert_eq!(yogurt.unit, "g");
        let blueberries = list.iter().find(|i| i.id == "ing_016").unwrap();
        assert_eq!(blueberries.amount, 200.0);
    }

    #[test]
    fn test_catalog_is_not_mutated() {
        let catalog = Catalog::builtin().unwrap();
        let plan = catalog.meal_plan("plan_003").unwrap();
        generate_grocery_list(plan).unwrap();
        assert_eq!(catalog.ingredient("ing_008").unwrap().amount, 100.0);
        assert_eq!(plan.meals[0].ingredients[1].amount, 100.0);
    }

    #[test]
    fn test_convertible_units_are_summed_in_first_unit() {
        let meals = vec![
            meal("a", vec![ingredient("rice", 1.0, "kg")]),
            meal("b", vec![ingredient("rice", 500.0, "g")]),
        ];
        let list = aggregate_ingredients(&meals).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].unit, "kg");
        assert!((list[0].amount - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_incompatible_units_are_rejected() {
        let meals = vec![
            meal("a", vec![ingredient("oil", 1.0, "tbsp")]),
            meal("b", vec![ingredient("oil", 10.0, "g")]),
        ];
        let err = aggregate_ingredients(&meals).unwrap_err();
        assert_eq!(
            err,
            GroceryError::IncompatibleUnit {
                ingredient_id: "oil".to_string(),
                name: "OIL".to_string(),
                expected: "tbsp".to_string(),
                found: "g".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_plan_gives_empty_list() {
        let meals: Vec<Meal> = Vec::new();
        assert!(aggregate_ingredients(&meals).unwrap().is_empty());
    }
}
