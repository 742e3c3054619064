//! Utility to print the grocery list for a meal plan
//!
//! Usage: grocery_list <plan_id> [--json]
//!        grocery_list --meals <meal_id>,<meal_id>,... [--json]

use fitfam::catalog::Catalog;
use fitfam::tools::grocery::{grocery_list_for_meals, grocery_list_for_plan, GroceryListResponse};

fn usage(catalog: &Catalog) -> String {
    let plans: Vec<String> = catalog
        .meal_plans()
        .iter()
        .map(|p| format!("  {}  {} / {}", p.id, p.goal.display_name(), p.level.as_str()))
        .collect();
    format!(
        "Usage: grocery_list <plan_id> [--json]\n       grocery_list --meals <meal_id>,... [--json]\n\nMeal plans:\n{}",
        plans.join("\n")
    )
}

fn print_table(list: &GroceryListResponse) {
    println!("Grocery list for {} ({} meals)", list.source, list.meal_count);
    println!("{}", "-".repeat(48));
    for item in &list.items {
        println!("{:<28} {:>10} {}", item.name, item.amount, item.unit);
    }
    println!("{}", "-".repeat(48));
    println!("{} items", list.item_count);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().filter(|a| *a != "--json").collect();

    let list = match positional.as_slice() {
        [flag, meals] if flag.as_str() == "--meals" => {
            let meal_ids: Vec<String> = meals
                .split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect();
            grocery_list_for_meals(&catalog, &meal_ids)?
        }
        [plan_id] if !plan_id.starts_with("--") => grocery_list_for_plan(&catalog, plan_id)?,
        _ => {
            eprintln!("{}", usage(&catalog));
            std::process::exit(2);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        print_table(&list);
    }
    Ok(())
}
