//! Settings state

use serde::{Deserialize, Serialize};

use super::{Store, StoreResult, StoreState};
use crate::models::{AppSettings, AppSettingsUpdate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsState {
    pub settings: Option<AppSettings>,
}

impl StoreState for SettingsState {
    const NAME: &'static str = "settings";
    const STORAGE_KEY: Option<&'static str> = Some("settings-storage");
}

impl Store<SettingsState> {
    pub fn set_settings(&mut self, settings: AppSettings) -> StoreResult<&SettingsState> {
        self.update(|s| s.settings = Some(settings))
    }

    /// Merge a partial update; ignored until settings exist
    pub fn update_settings(&mut self, update: AppSettingsUpdate) -> StoreResult<&SettingsState> {
        if self.get().settings.is_none() {
            return Ok(self.get());
        }
        self.update(|s| {
            if let Some(settings) = s.settings.as_mut() {
                settings.apply(update);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_without_settings_is_ignored() {
        let mut store: Store<SettingsState> = Store::new();
        store
            .update_settings(AppSettingsUpdate {
                language: Some("fr".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(store.get().settings.is_none());

        store.set_settings(AppSettings::defaults_for("u1")).unwrap();
        store
            .update_settings(AppSettingsUpdate {
                language: Some("fr".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.get().settings.as_ref().unwrap().language, "fr");
    }
}
