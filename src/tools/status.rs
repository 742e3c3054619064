//! FitFam Status Tool
//!
//! Runtime status of the FitFam service and the usage guide for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::catalog::Catalog;
use crate::store::AppStores;

/// How to drive the FitFam tools, for AI assistants
pub const USAGE_INSTRUCTIONS: &str = r#"
# FitFam Usage Instructions

## Signing in

1. `sign_in` with the phone number and the 6-digit code the user received.
2. If the response says `needs_profile: true`, collect name, age (13-100),
   weight in kg (30-300), height in cm (100-250) and a goal, then call
   `create_profile` with the same phone number.
3. Field problems come back as messages keyed by field name. Show them to the
   user as they are.

## Browsing

- Goals: weight_loss, weight_gain, bulking, abs_cutting, maintenance
- Levels: beginner, intermediate, advanced
- `list_meal_plans` / `list_workout_programs` take an optional goal and level.
- `get_meal_plan`, `get_meal`, `get_workout_program`, `get_workout`, `get_exercise`
  look up single entries by id (plan_001, meal_002, prog_001, workout_001, ex_001).
- `grocery_list` builds a shopping list for a meal plan, or for a list of meal ids.

## Tracking

- `select_meal_plan`, then `log_meal` with a meal id and servings.
- `add_water` takes millilitres. `water_goal` compares intake to the daily goal.
- `save_day` stores today's log so it shows up in `get_day` later.
- `select_program` picks a program and sets today's workout.
- `complete_workout` records a session; leave `exercises` out when the workout
  was done as prescribed.
- `record_progress` takes weight (kg), body fat (%) and/or measurements (cm).

## Family

- `create_family` returns a 6-character invite code to share.
- `join_family` accepts the code in any case.
- Completed workouts, logged meals and progress check-ins appear in the
  family feed (`get_family`).
"#;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogCounts {
    pub ingredients: usize,
    pub meals: usize,
    pub meal_plans: usize,
    pub exercises: usize,
    pub programs: usize,
}

impl CatalogCounts {
    pub fn of(catalog: &Catalog) -> Self {
        Self {
            ingredients: catalog.ingredients().len(),
            meals: catalog.meals().len(),
            meal_plans: catalog.meal_plans().len(),
            exercises: catalog.exercises().len(),
            programs: catalog.programs().len(),
        }
    }
}

/// Stores whose last save failed and are waiting for a flush
fn unsaved_stores(stores: &AppStores) -> Vec<&'static str> {
    [
        ("auth", stores.auth.is_dirty()),
        ("family", stores.family.is_dirty()),
        ("workout", stores.workout.is_dirty()),
        ("nutrition", stores.nutrition.is_dirty()),
        ("progress", stores.progress.is_dirty()),
        ("settings", stores.settings.is_dirty()),
    ]
    .into_iter()
    .filter(|(_, dirty)| *dirty)
    .map(|(name, _)| name)
    .collect()
}

/// Runtime status of the FitFam service
#[derive(Debug, Clone, Serialize)]
pub struct FitFamStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub remote_timeout_seconds: u64,

    pub catalog: CatalogCounts,
    pub signed_in_user: Option<String>,
    pub unsaved_stores: Vec<&'static str>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    remote_timeout: Duration,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf, remote_timeout: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            remote_timeout,
        }
    }

    pub fn get_status(&self, catalog: &Catalog, stores: &AppStores) -> FitFamStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FitFamStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            remote_timeout_seconds: self.remote_timeout.as_secs(),
            catalog: CatalogCounts::of(catalog),
            signed_in_user: stores.auth.get().user.as_ref().map(|u| u.id.clone()),
            unsaved_stores: unsaved_stores(stores),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_catalog_and_process() {
        let catalog = Catalog::builtin().unwrap();
        let stores = AppStores::in_memory();
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/fitfam.db"), Duration::from_secs(15));

        let status = tracker.get_status(&catalog, &stores);
        assert_eq!(status.catalog.meal_plans, 6);
        assert_eq!(status.catalog.exercises, 10);
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.remote_timeout_seconds, 15);
        assert!(status.unsaved_stores.is_empty());
        assert_eq!(status.process_id, std::process::id());
    }
}
