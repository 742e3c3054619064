//! Progress state

use serde::{Deserialize, Serialize};

use super::{Store, StoreResult, StoreState};
use crate::models::{ProgressEntry, UserAchievement};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub progress_entries: Vec<ProgressEntry>,
    pub current_weight: Option<f64>,
    pub current_body_fat: Option<f64>,
    pub achievements: Vec<UserAchievement>,
}

impl StoreState for ProgressState {
    const NAME: &'static str = "progress";
    const STORAGE_KEY: Option<&'static str> = Some("progress-storage");
}

impl Store<ProgressState> {
    pub fn set_progress_entries(&mut self, entries: Vec<ProgressEntry>) -> StoreResult<&ProgressState> {
        self.update(|s| s.progress_entries = entries)
    }

    /// Newest first; weight and body fat become current when the entry carries them
    pub fn add_progress_entry(&mut self, entry: ProgressEntry) -> StoreResult<&ProgressState> {
        self.update(|s| {
            if let Some(weight) = entry.weight {
                s.current_weight = Some(weight);
            }
            if let Some(body_fat) = entry.body_fat {
                s.current_body_fat = Some(body_fat);
            }
            s.progress_entries.insert(0, entry);
        })
    }

    pub fn set_current_weight(&mut self, weight: Option<f64>) -> StoreResult<&ProgressState> {
        self.update(|s| s.current_weight = weight)
    }

    pub fn set_current_body_fat(&mut self, body_fat: Option<f64>) -> StoreResult<&ProgressState> {
        self.update(|s| s.current_body_fat = body_fat)
    }

    pub fn set_achievements(
        &mut self,
        achievements: Vec<UserAchievement>,
    ) -> StoreResult<&ProgressState> {
        self.update(|s| s.achievements = achievements)
    }

    /// Newest first
    pub fn add_achievement(&mut self, achievement: UserAchievement) -> StoreResult<&ProgressState> {
        self.update(|s| s.achievements.insert(0, achievement))
    }
}
