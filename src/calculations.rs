//! Body and activity calculations

use serde::{Deserialize, Serialize};

/// BMI from weight in kg and height in cm
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// MET value for an activity name; unknown activities use 4.0
pub fn met_value(activity: &str) -> f64 {
    match activity.trim().to_lowercase().as_str() {
        "walking" => 3.8,
        "running" => 8.0,
        "cycling" => 6.8,
        "swimming" => 6.0,
        "weightlifting" => 3.0,
        "yoga" => 2.5,
        "dancing" => 4.8,
        "hiking" => 6.0,
        _ => 4.0,
    }
}

/// Calories burned: MET x kg x hours, rounded
pub fn calculate_calories_burned(activity: &str, duration_minutes: f64, weight_kg: f64) -> f64 {
    (met_value(activity) * weight_kg * duration_minutes / 60.0).round()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl ActivityLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(ActivityLevel::Low),
            "moderate" => Some(ActivityLevel::Moderate),
            "high" => Some(ActivityLevel::High),
            _ => None,
        }
    }

    fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Low => 1.0,
            ActivityLevel::Moderate => 1.2,
            ActivityLevel::High => 1.5,
        }
    }
}

/// Daily water goal in ml: 35 ml per kg, scaled by activity
pub fn water_intake_goal(weight_kg: f64, activity: ActivityLevel) -> f64 {
    (weight_kg * 35.0 * activity.multiplier()).round()
}
