//! Ingredient, meal and meal plan tables

use super::{IngredientDef, MealDef, MealPlanDef};
use crate::models::{FitnessGoal, FitnessLevel, Macros, MealType};

pub const INGREDIENTS: &[IngredientDef] = &[
    // Proteins
    IngredientDef {
        id: "ing_001",
        name: "Chicken Breast",
        amount: 100.0,
        unit: "g",
        calories: 165.0,
        macros: Macros::new(31.0, 0.0, 3.6),
    },
    IngredientDef {
        id: "ing_002",
        name: "Salmon",
        amount: 100.0,
        unit: "g",
        calories: 208.0,
        macros: Macros::new(25.0, 0.0, 12.0),
    },
    IngredientDef {
        id: "ing_003",
        name: "Eggs",
        amount: 1.0,
        unit: "large",
        calories: 70.0,
        macros: Macros::new(6.0, 0.6, 5.0),
    },
    IngredientDef {
        id: "ing_004",
        name: "Greek Yogurt",
        amount: 100.0,
        unit: "g",
        calories: 100.0,
        macros: Macros::new(10.0, 6.0, 5.0),
    },
    // Carbohydrates
    IngredientDef {
        id: "ing_005",
        name: "Brown Rice",
        amount: 100.0,
        unit: "g cooked",
        calories: 111.0,
        macros: Macros::new(2.6, 23.0, 0.9),
    },
    IngredientDef {
        id: "ing_006",
        name: "Quinoa",
        amount: 100.0,
        unit: "g cooked",
        calories: 120.0,
        macros: Macros::new(4.4, 22.0, 1.9),
    },
    IngredientDef {
        id: "ing_007",
        name: "Sweet Potato",
        amount: 100.0,
        unit: "g",
        calories: 86.0,
        macros: Macros::new(1.6, 20.0, 0.1),
    },
    IngredientDef {
        id: "ing_008",
        name: "Oats",
        amount: 100.0,
        unit: "g dry",
        calories: 389.0,
        macros: Macros::new(16.9, 66.0, 6.9),
    },
    // Vegetables
    IngredientDef {
        id: "ing_009",
        name: "Broccoli",
        amount: 100.0,
        unit: "g",
        calories: 34.0,
        macros: Macros::new(2.8, 7.0, 0.4),
    },
    IngredientDef {
        id: "ing_010",
        name: "Spinach",
        amount: 100.0,
        unit: "g",
        calories: 23.0,
        macros: Macros::new(2.9, 3.6, 0.4),
    },
    IngredientDef {
        id: "ing_011",
        name: "Bell Peppers",
        amount: 100.0,
        unit: "g",
        calories: 31.0,
        macros: Macros::new(1.0, 7.0, 0.3),
    },
    // Fats
    IngredientDef {
        id: "ing_012",
        name: "Avocado",
        amount: 100.0,
        unit: "g",
        calories: 160.0,
        macros: Macros::new(2.0, 9.0, 15.0),
    },
    IngredientDef {
        id: "ing_013",
        name: "Almonds",
        amount: 30.0,
        unit: "g",
        calories: 174.0,
        macros: Macros::new(6.0, 6.0, 15.0),
    },
    IngredientDef {
        id: "ing_014",
        name: "Olive Oil",
        amount: 1.0,
        unit: "tbsp",
        calories: 119.0,
        macros: Macros::new(0.0, 0.0, 13.5),
    },
    // Fruits
    IngredientDef {
        id: "ing_015",
        name: "Banana",
        amount: 1.0,
        unit: "medium",
        calories: 105.0,
        macros: Macros::new(1.3, 27.0, 0.4),
    },
    IngredientDef {
        id: "ing_016",
        name: "Blueberries",
        amount: 100.0,
        unit: "g",
        calories: 57.0,
        macros: Macros::new(0.7, 14.0, 0.3),
    },
];

pub const MEALS: &[MealDef] = &[
    MealDef {
        id: "meal_001",
        name: "Protein Power Breakfast",
        meal_type: MealType::Breakfast,
        calories: 420.0,
        macros: Macros::new(35.0, 30.0, 18.0),
        ingredients: &["ing_003", "ing_008", "ing_016", "ing_013"],
        instructions: &[
            "Cook 2 eggs scrambled or boiled",
            "Prepare 40g oats with water or milk",
            "Top oats with blueberries and almonds",
            "Serve eggs alongside oats",
        ],
        prep_time: 5,
        cook_time: 10,
        servings: 1,
        image_url: Some("https://example.com/meals/protein_breakfast.jpg"),
    },
    MealDef {
        id: "meal_002",
        name: "Greek Yogurt Parfait",
        meal_type: MealType::Breakfast,
        calories: 280.0,
        macros: Macros::new(20.0, 35.0, 8.0),
        ingredients: &["ing_004", "ing_016", "ing_008"],
        instructions: &[
            "Layer Greek yogurt in a bowl",
            "Add fresh blueberries",
            "Sprinkle with granola or oats",
            "Repeat layers and enjoy",
        ],
        prep_time: 5,
        cook_time: 0,
        servings: 1,
        image_url: Some("https://example.com/meals/yogurt_parfait.jpg"),
    },
    MealDef {
        id: "meal_003",
        name: "Grilled Chicken Bowl",
        meal_type: MealType::Lunch,
        calories: 450.0,
        macros: Macros::new(40.0, 35.0, 15.0),
        ingredients: &["ing_001", "ing_005", "ing_009", "ing_014"],
        instructions: &[
            "Season and grill 150g chicken breast",
            "Cook 80g brown rice according to package instructions",
            "Steam broccoli until tender",
            "Drizzle with olive oil and serve",
        ],
        prep_time: 10,
        cook_time: 20,
        servings: 1,
        image_url: Some("https://example.com/meals/chicken_bowl.jpg"),
    },
    MealDef {
        id: "meal_004",
        name: "Quinoa Power Salad",
        meal_type: MealType::Lunch,
        calories: 380.0,
        macros: Macros::new(18.0, 45.0, 12.0),
        ingredients: &["ing_006", "ing_010", "ing_011", "ing_012"],
        instructions: &[
            "Cook quinoa and let cool",
            "Mix with fresh spinach and diced bell peppers",
            "Add sliced avocado",
            "Dress with lemon and olive oil",
        ],
        prep_time: 15,
        cook_time: 15,
        servings: 1,
        image_url: Some("https://example.com/meals/quinoa_salad.jpg"),
    },
    MealDef {
        id: "meal_005",
        name: "Baked Salmon Dinner",
        meal_type: MealType::Dinner,
        calories: 520.0,
        macros: Macros::new(35.0, 30.0, 25.0),
        ingredients: &["ing_002", "ing_007", "ing_009", "ing_014"],
        instructions: &[
            "Bake 150g salmon at 400°F for 15 minutes",
            "Roast sweet potato wedges with olive oil",
            "Steam broccoli until tender",
            "Season all with herbs and spices",
        ],
        prep_time: 10,
        cook_time: 25,
        servings: 1,
        image_url: Some("https://example.com/meals/salmon_dinner.jpg"),
    },
    MealDef {
        id: "meal_006",
        name: "Protein Smoothie",
        meal_type: MealType::Snack,
        calories: 250.0,
        macros: Macros::new(20.0, 25.0, 8.0),
        ingredients: &["ing_004", "ing_015", "ing_016"],
        instructions: &[
            "Blend Greek yogurt with banana",
            "Add blueberries and blend until smooth",
            "Add ice if desired",
            "Serve immediately",
        ],
        prep_time: 5,
        cook_time: 0,
        servings: 1,
        image_url: Some("https://example.com/meals/protein_smoothie.jpg"),
    },
    MealDef {
        id: "meal_007",
        name: "Almond Energy Balls",
        meal_type: MealType::Snack,
        calories: 180.0,
        macros: Macros::new(8.0, 15.0, 12.0),
        ingredients: &["ing_013", "ing_008"],
        instructions: &[
            "Blend almonds and oats in food processor",
            "Form into small balls",
            "Refrigerate for 30 minutes",
            "Store in fridge for up to a week",
        ],
        prep_time: 15,
        cook_time: 0,
        servings: 4,
        image_url: Some("https://example.com/meals/energy_balls.jpg"),
    },
];

pub const MEAL_PLANS: &[MealPlanDef] = &[
    MealPlanDef {
        id: "plan_001",
        goal: FitnessGoal::WeightLoss,
        level: FitnessLevel::Beginner,
        daily_calories: 1500.0,
        macros: Macros::new(120.0, 150.0, 50.0),
        meals: &["meal_002", "meal_004", "meal_005", "meal_006"],
    },
    MealPlanDef {
        id: "plan_002",
        goal: FitnessGoal::WeightLoss,
        level: FitnessLevel::Intermediate,
        daily_calories: 1400.0,
        macros: Macros::new(130.0, 140.0, 45.0),
        meals: &["meal_002", "meal_003", "meal_005", "meal_007"],
    },
    MealPlanDef {
        id: "plan_003",
        goal: FitnessGoal::WeightGain,
        level: FitnessLevel::Beginner,
        daily_calories: 2500.0,
        macros: Macros::new(150.0, 300.0, 85.0),
        meals: &["meal_001", "meal_003", "meal_005", "meal_006", "meal_007"],
    },
    MealPlanDef {
        id: "plan_004",
        goal: FitnessGoal::Bulking,
        level: FitnessLevel::Advanced,
        daily_calories: 3000.0,
        macros: Macros::new(180.0, 375.0, 100.0),
        meals: &["meal_001", "meal_003", "meal_005", "meal_006", "meal_007"],
    },
    MealPlanDef {
        id: "plan_005",
        goal: FitnessGoal::AbsCutting,
        level: FitnessLevel::Intermediate,
        daily_calories: 1600.0,
        macros: Macros::new(140.0, 120.0, 60.0),
        meals: &["meal_002", "meal_004", "meal_005", "meal_006"],
    },
    MealPlanDef {
        id: "plan_006",
        goal: FitnessGoal::Maintenance,
        level: FitnessLevel::Intermediate,
        daily_calories: 2000.0,
        macros: Macros::new(130.0, 250.0, 70.0),
        meals: &["meal_001", "meal_003", "meal_005", "meal_006"],
    },
];
