//! Workout catalog models
//!
//! Exercises, workouts and multi-week workout programs.

use serde::{Deserialize, Serialize};

use super::{FitnessGoal, FitnessLevel};

/// Exercise category enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
    Core,
    Compound,
}

impl ExerciseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::Strength => "strength",
            ExerciseCategory::Cardio => "cardio",
            ExerciseCategory::Flexibility => "flexibility",
            ExerciseCategory::Core => "core",
            ExerciseCategory::Compound => "compound",
        }
    }
}

/// Repetitions: a plain count or a prescription such as "10-12" or "30 seconds"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Text(String),
}

impl Reps {
    /// Whether the prescription is a hold or timed interval rather than a rep count
    pub fn is_timed(&self) -> bool {
        match self {
            Reps::Count(_) => false,
            Reps::Text(text) => text.contains("second") || text.contains("minute"),
        }
    }

    /// The smallest prescribed number: `12` for 12, `10` for "10-15", `30` for "30-60 seconds"
    pub fn minimum(&self) -> Option<u32> {
        match self {
            Reps::Count(n) => Some(*n),
            Reps::Text(text) => {
                let digits: String = text
                    .chars()
                    .skip_while(|c| !c.is_ascii_digit())
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                digits.parse().ok()
            }
        }
    }

    /// Minimum hold time in seconds, for timed prescriptions
    pub fn minimum_seconds(&self) -> Option<u32> {
        if !self.is_timed() {
            return None;
        }
        let n = self.minimum()?;
        match self {
            Reps::Text(text) if text.contains("minute") => Some(n * 60),
            _ => Some(n),
        }
    }
}

impl std::fmt::Display for Reps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reps::Count(n) => write!(f, "{}", n),
            Reps::Text(text) => f.write_str(text),
        }
    }
}

/// A catalog exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub sets: u32,
    pub reps: Reps,
    pub rest_time: u32, // seconds
    pub instructions: Vec<String>,
    pub muscle_groups: Vec<String>,
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,
}

impl Exercise {
    pub fn targets(&self, muscle_group: &str) -> bool {
        self.muscle_groups
            .iter()
            .any(|m| m.eq_ignore_ascii_case(muscle_group))
    }
}

/// A single scheduled workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub day: u32,
    pub week: u32,
    pub exercises: Vec<Exercise>,
    pub estimated_duration: u32, // minutes
}

impl Workout {
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }
}

/// A multi-week program for a goal and level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutProgram {
    pub id: String,
    pub name: String,
    pub goal: FitnessGoal,
    pub level: FitnessLevel,
    pub duration: u32, // weeks
    pub description: String,
    pub workouts: Vec<Workout>,
}
