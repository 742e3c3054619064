//! Grocery Tools
//!
//! Shopping lists for a meal plan or a hand-picked set of meals.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::models::{Ingredient, Meal};
use crate::nutrition::{aggregate_ingredients, generate_grocery_list};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryItem {
    pub ingredient_id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl From<Ingredient> for GroceryItem {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            ingredient_id: ingredient.id,
            name: ingredient.name,
            amount: round_amount(ingredient.amount),
            unit: ingredient.unit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroceryListResponse {
    pub source: String,
    pub meal_count: usize,
    pub item_count: usize,
    pub items: Vec<GroceryItem>,
}

/// Two decimals is enough for a shopping list; unit conversions leave long tails
fn round_amount(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn response(source: String, meal_count: usize, list: Vec<Ingredient>) -> GroceryListResponse {
    let items: Vec<GroceryItem> = list.into_iter().map(GroceryItem::from).collect();
    GroceryListResponse {
        source,
        meal_count,
        item_count: items.len(),
        items,
    }
}

/// Shopping list for every meal of a meal plan
pub fn grocery_list_for_plan(catalog: &Catalog, plan_id: &str) -> AppResult<GroceryListResponse> {
    let plan = catalog
        .meal_plan(plan_id)
        .ok_or_else(|| AppError::not_found(format!("Meal plan '{}'", plan_id)))?;
    let list = generate_grocery_list(plan)?;
    Ok(response(plan.id.clone(), plan.meals.len(), list))
}

/// Shopping list for the given meals, in the given order
pub fn grocery_list_for_meals(
    catalog: &Catalog,
    meal_ids: &[String],
) -> AppResult<GroceryListResponse> {
    if meal_ids.is_empty() {
        return Err(AppError::InvalidInput("Provide at least one meal id".to_string()));
    }
    let meals = meal_ids
        .iter()
        .map(|id| {
            catalog
                .meal(id)
                .ok_or_else(|| AppError::not_found(format!("Meal '{}'", id)))
        })
        .collect::<AppResult<Vec<&Meal>>>()?;

    let list = aggregate_ingredients(meals.iter().copied())?;
    Ok(response(meal_ids.join(","), meals.len(), list))
}
