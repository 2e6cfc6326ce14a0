use std::collections::HashSet;

use derive_more::Deref;
use log::warn;

use crate::{ReadError, UpdateError, Workout, WorkoutID};

pub trait HistoryRepository {
    fn read_history(&self) -> Result<History, ReadError>;
    fn write_history(&self, history: &History) -> Result<(), UpdateError>;
}

/// Recorded workouts, newest first.
///
/// Workout ids are unique within a history.
#[derive(Deref, Debug, Default, Clone, PartialEq)]
pub struct History(Vec<Workout>);

impl History {
    /// Creates a history from workouts ordered newest first.
    ///
    /// Of several workouts with the same id only the first one is kept.
    #[must_use]
    pub fn new(workouts: Vec<Workout>) -> Self {
        let mut ids = HashSet::new();
        let mut unique = Vec::with_capacity(workouts.len());
        for workout in workouts {
            if ids.insert(workout.id.clone()) {
                unique.push(workout);
            } else {
                warn!("dropping duplicate workout {}", workout.id);
            }
        }
        Self(unique)
    }

    #[must_use]
    pub fn contains(&self, id: &WorkoutID) -> bool {
        self.0.iter().any(|w| w.id == *id)
    }

    #[must_use]
    pub fn get(&self, id: &WorkoutID) -> Option<&Workout> {
        self.0.iter().find(|w| w.id == *id)
    }

    /// Adds a workout as the newest entry.
    ///
    /// The workout is handed back if its id is already taken.
    pub fn prepend(&mut self, workout: Workout) -> Result<(), Workout> {
        if self.contains(&workout.id) {
            return Err(workout);
        }
        self.0.insert(0, workout);
        Ok(())
    }

    /// Removes the workout with the given id and reports whether it existed.
    pub fn remove(&mut self, id: &WorkoutID) -> bool {
        let len = self.0.len();
        self.0.retain(|w| w.id != *id);
        self.0.len() != len
    }
}
