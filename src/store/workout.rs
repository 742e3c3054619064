//! Workout state

use serde::{Deserialize, Serialize};

use super::{Store, StoreResult, StoreState};
use crate::models::{Workout, WorkoutProgram, WorkoutSession};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutState {
    pub current_program: Option<WorkoutProgram>,
    pub current_workout: Option<Workout>,
    pub workout_sessions: Vec<WorkoutSession>,
    pub todays_workout: Option<Workout>,
}

impl StoreState for WorkoutState {
    const NAME: &'static str = "workout";
    const STORAGE_KEY: Option<&'static str> = Some("workout-storage");
}

impl Store<WorkoutState> {
    pub fn set_current_program(
        &mut self,
        program: Option<WorkoutProgram>,
    ) -> StoreResult<&WorkoutState> {
        self.update(|s| s.current_program = program)
    }

    /// Follow a program, with `first` as today's workout
    pub fn follow_program(
        &mut self,
        program: WorkoutProgram,
        first: Option<Workout>,
    ) -> StoreResult<&WorkoutState> {
        self.update(|s| {
            s.current_program = Some(program);
            s.todays_workout = first;
        })
    }

    pub fn set_current_workout(&mut self, workout: Option<Workout>) -> StoreResult<&WorkoutState> {
        self.update(|s| s.current_workout = workout)
    }

    pub fn set_workout_sessions(
        &mut self,
        sessions: Vec<WorkoutSession>,
    ) -> StoreResult<&WorkoutState> {
        self.update(|s| s.workout_sessions = sessions)
    }

    /// Newest first
    pub fn add_workout_session(&mut self, session: WorkoutSession) -> StoreResult<&WorkoutState> {
        self.update(|s| s.workout_sessions.insert(0, session))
    }

    pub fn set_todays_workout(&mut self, workout: Option<Workout>) -> StoreResult<&WorkoutState> {
        self.update(|s| s.todays_workout = workout)
    }
}
