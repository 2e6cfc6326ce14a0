use chrono::{DateTime, Utc};
use firstrep_domain as domain;

pub trait OngoingWorkoutService {
    fn get_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, String>;
    fn set_ongoing_workout(&self, ongoing_workout: Option<OngoingWorkout>) -> Result<(), String>;
}

pub trait OngoingWorkoutRepository {
    fn read_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, String>;
    fn write_ongoing_workout(&self, ongoing_workout: Option<OngoingWorkout>) -> Result<(), String>;
}

/// Generated workout that has been neither recorded nor discarded yet.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct OngoingWorkout {
    pub workout_id: String,
    pub split: String,
    pub sets: u32,
    pub exercises: Vec<String>,
    pub start_time: DateTime<Utc>,
}

impl OngoingWorkout {
    #[must_use]
    pub fn new(template: &domain::WorkoutTemplate) -> Self {
        Self {
            workout_id: template.id.to_string(),
            split: template.split.to_string(),
            sets: template.sets.into(),
            exercises: template.exercises.clone(),
            start_time: Utc::now(),
        }
    }

    pub fn template(&self) -> Result<domain::WorkoutTemplate, domain::SplitIdError> {
        Ok(domain::WorkoutTemplate {
            id: self.workout_id.clone().into(),
            split: domain::SplitId::try_from(self.split.as_str())?,
            sets: self.sets.into(),
            exercises: self.exercises.clone(),
        })
    }
}
