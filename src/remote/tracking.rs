//! Workout, nutrition and progress history in the document store

use chrono::NaiveDate;
use serde_json::Value;

use super::{newest_first, to_fields, Gateway, RemoteResult};
use crate::models::{DailyNutrition, ProgressEntry, WorkoutSession};

#[derive(Clone)]
pub struct TrackingService {
    gateway: Gateway,
}

impl TrackingService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    fn user_key(user_id: &str) -> Value {
        Value::String(user_id.to_string())
    }

    /// Store a session as given and return its new id
    pub async fn save_workout_session(&self, session: &WorkoutSession) -> RemoteResult<String> {
        let id = self.gateway.create(session).await?;
        tracing::debug!(session_id = %id, user_id = %session.user_id, "workout session saved");
        Ok(id)
    }

    /// Newest first
    pub async fn get_user_workout_sessions(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> RemoteResult<Vec<WorkoutSession>> {
        let sessions: Vec<WorkoutSession> =
            self.gateway.find("userId", Self::user_key(user_id)).await?;
        Ok(newest_first(sessions, |s| s.date, limit))
    }

    pub async fn save_daily_nutrition(&self, log: &DailyNutrition) -> RemoteResult<String> {
        self.gateway.create(log).await
    }

    /// Replace the fields of a saved log
    pub async fn update_daily_nutrition(&self, log_id: &str, log: &DailyNutrition) -> RemoteResult<()> {
        let fields = to_fields::<DailyNutrition, _>(log)?;
        self.gateway.update::<DailyNutrition>(log_id, fields).await
    }

    /// The user's log for a calendar day (UTC), if one was saved
    pub async fn get_daily_nutrition(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> RemoteResult<Option<DailyNutrition>> {
        let logs: Vec<DailyNutrition> =
            self.gateway.find("userId", Self::user_key(user_id)).await?;
        Ok(logs.into_iter().find(|log| log.is_on(day)))
    }

    pub async fn save_progress_entry(&self, entry: &ProgressEntry) -> RemoteResult<String> {
        self.gateway.create(entry).await
    }

    /// Newest first
    pub async fn get_progress_entries(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> RemoteResult<Vec<ProgressEntry>> {
        let entries: Vec<ProgressEntry> =
            self.gateway.find("userId", Self::user_key(user_id)).await?;
        Ok(newest_first(entries, |e| e.date, limit))
    }
}
