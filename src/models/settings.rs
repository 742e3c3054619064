//! App settings model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub workout_reminders: bool,
    pub meal_reminders: bool,
    pub family_updates: bool,
    pub achievements: bool,
    pub reminder_time: String, // HH:MM
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            workout_reminders: true,
            meal_reminders: true,
            family_updates: true,
            achievements: true,
            reminder_time: "08:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Ft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Miles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSettings {
    pub weight: WeightUnit,
    pub height: HeightUnit,
    pub distance: DistanceUnit,
    pub temperature: TemperatureUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Per-user application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub user_id: String,
    pub notifications: NotificationSettings,
    pub units: UnitSettings,
    pub theme: Theme,
    pub language: String,
}

impl AppSettings {
    pub fn defaults_for(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            notifications: NotificationSettings::default(),
            units: UnitSettings::default(),
            theme: Theme::default(),
            language: "en".to_string(),
        }
    }
}

/// Partial settings update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettingsUpdate {
    pub notifications: Option<NotificationSettings>,
    pub units: Option<UnitSettings>,
    pub theme: Option<Theme>,
    pub language: Option<String>,
}

impl AppSettings {
    pub fn apply(&mut self, update: AppSettingsUpdate) {
        if let Some(notifications) = update.notifications {
            self.notifications = notifications;
        }
        if let Some(units) = update.units {
            self.units = units;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(language) = update.language {
            self.language = language;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut settings = AppSettings::defaults_for("u1");
        settings.apply(AppSettingsUpdate {
            theme: Some(Theme::Dark),
            ..Default::default()
        });
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.language, "en");
        assert_eq!(settings.units.weight, WeightUnit::Kg);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(AppSettings::defaults_for("u1")).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["notifications"]["reminderTime"], "08:00");
        assert_eq!(json["units"]["temperature"], "celsius");
    }
}
