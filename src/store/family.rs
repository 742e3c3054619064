//! Family state (kept in memory only)

use serde::{Deserialize, Serialize};

use super::{Store, StoreResult, StoreState};
use crate::models::{FamilyActivity, FamilyGroup, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyState {
    pub family_group: Option<FamilyGroup>,
    pub family_members: Vec<User>,
    pub family_activities: Vec<FamilyActivity>,
}

impl StoreState for FamilyState {
    const NAME: &'static str = "family";
    const STORAGE_KEY: Option<&'static str> = None;
}

impl Store<FamilyState> {
    pub fn set_family_group(&mut self, group: Option<FamilyGroup>) -> StoreResult<&FamilyState> {
        self.update(|s| s.family_group = group)
    }

    pub fn set_family_members(&mut self, members: Vec<User>) -> StoreResult<&FamilyState> {
        self.update(|s| s.family_members = members)
    }

    pub fn set_family_activities(
        &mut self,
        activities: Vec<FamilyActivity>,
    ) -> StoreResult<&FamilyState> {
        self.update(|s| s.family_activities = activities)
    }

    /// Newest first
    pub fn add_family_activity(&mut self, activity: FamilyActivity) -> StoreResult<&FamilyState> {
        self.update(|s| s.family_activities.insert(0, activity))
    }
}
