//! Nutrition helpers
//!
//! Unit handling and grocery list aggregation.

pub mod grocery;
pub mod units;

pub use grocery::{aggregate_ingredients, generate_grocery_list, GroceryError};
pub use units::{categorize_unit, convert_amount, UnitCategory};
