//! Fitness goal and level
//!
//! The two closed filter keys shared by meal plans and workout programs.

use serde::{Deserialize, Serialize};

/// Fitness objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    WeightGain,
    Bulking,
    AbsCutting,
    Maintenance,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 5] = [
        FitnessGoal::WeightLoss,
        FitnessGoal::WeightGain,
        FitnessGoal::Bulking,
        FitnessGoal::AbsCutting,
        FitnessGoal::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "weight_loss",
            FitnessGoal::WeightGain => "weight_gain",
            FitnessGoal::Bulking => "bulking",
            FitnessGoal::AbsCutting => "abs_cutting",
            FitnessGoal::Maintenance => "maintenance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weight_loss" => Some(FitnessGoal::WeightLoss),
            "weight_gain" => Some(FitnessGoal::WeightGain),
            "bulking" => Some(FitnessGoal::Bulking),
            "abs_cutting" => Some(FitnessGoal::AbsCutting),
            "maintenance" => Some(FitnessGoal::Maintenance),
            _ => None,
        }
    }

    /// Human readable label ("Weight Loss")
    pub fn display_name(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::WeightGain => "Weight Gain",
            FitnessGoal::Bulking => "Bulking",
            FitnessGoal::AbsCutting => "Abs Cutting",
            FitnessGoal::Maintenance => "Maintenance",
        }
    }
}

/// Training experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub const ALL: [FitnessLevel; 3] = [
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(FitnessLevel::Beginner),
            "intermediate" => Some(FitnessLevel::Intermediate),
            "advanced" => Some(FitnessLevel::Advanced),
            _ => None,
        }
    }
}
