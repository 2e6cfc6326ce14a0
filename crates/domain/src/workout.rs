use chrono::{DateTime, Utc};
use derive_more::{AsRef, Display, Into};
use uuid::Uuid;

use crate::{
    DeleteError, GenerateError, History, HistoryRepository, PersonalRecord,
    PersonalRecordRepository, PersonalRecords, ReadError, RecordError, Schedule, SplitId,
    UpdateError, catalog,
};

pub trait WorkoutService {
    /// Produces the template for the next workout and advances the rotation.
    fn generate_template(&self, days: f64, minutes: f64)
    -> Result<WorkoutTemplate, GenerateError>;
    fn record_workout(
        &self,
        id: WorkoutID,
        split: SplitId,
        sets: Sets,
        entries: Vec<WorkoutEntry>,
    ) -> Result<RecordedWorkout, RecordError>;
    fn get_history(&self) -> Result<History, ReadError>;
    fn delete_workout(&self, id: &WorkoutID) -> Result<bool, DeleteError>;
    fn get_personal_records(&self) -> Result<PersonalRecords, ReadError>;
}

pub trait WorkoutRepository: HistoryRepository + PersonalRecordRepository {
    /// Persists history and personal records together, or neither of them.
    fn write_workout_log(
        &self,
        history: &History,
        personal_records: &PersonalRecords,
    ) -> Result<(), UpdateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub created_at: DateTime<Utc>,
    pub split: SplitId,
    pub sets: Sets,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    /// Builds a workout from the raw values entered for a template.
    ///
    /// Unparsable, negative or non-finite numbers are treated as not entered.
    pub fn from_entries(
        id: WorkoutID,
        created_at: DateTime<Utc>,
        split: SplitId,
        sets: Sets,
        entries: &[WorkoutEntry],
    ) -> Result<Self, RecordError> {
        if entries.is_empty() {
            return Err(RecordError::EmptySession);
        }

        let exercises = entries
            .iter()
            .map(|entry| entry.resolve(sets))
            .collect::<Vec<_>>();

        if exercises.iter().all(Exercise::is_blank) {
            return Err(RecordError::NoData);
        }

        Ok(Self {
            id,
            created_at,
            split,
            sets,
            exercises,
        })
    }

    /// Candidate personal records, i.e. exercises with both weight and reps.
    pub fn personal_records(&self) -> impl Iterator<Item = (&str, PersonalRecord)> {
        self.exercises
            .iter()
            .filter_map(|e| e.personal_record().map(|pr| (e.name.as_str(), pr)))
    }
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(String);

impl WorkoutID {
    #[must_use]
    pub fn random() -> Self {
        Self(format!("w_{}", Uuid::new_v4().simple()))
    }
}

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub weight: Option<Weight>,
    pub reps: Option<Reps>,
    pub sets: Sets,
}

impl Exercise {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.weight.is_none() && self.reps.is_none()
    }

    #[must_use]
    pub fn personal_record(&self) -> Option<PersonalRecord> {
        match (self.weight, self.reps) {
            (Some(weight), Some(reps)) => Some(PersonalRecord { weight, reps }),
            _ => None,
        }
    }
}

/// Raw values entered for one exercise of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutEntry {
    pub name: String,
    pub weight: String,
    pub reps: String,
}

impl WorkoutEntry {
    pub fn new(
        name: impl Into<String>,
        weight: impl Into<String>,
        reps: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            weight: weight.into(),
            reps: reps.into(),
        }
    }

    #[must_use]
    pub fn blank(name: impl Into<String>) -> Self {
        Self::new(name, "", "")
    }

    #[must_use]
    pub fn resolve(&self, sets: Sets) -> Exercise {
        Exercise {
            name: self.name.clone(),
            weight: Weight::parse_lenient(&self.weight),
            reps: Reps::parse_lenient(&self.reps),
            sets,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutTemplate {
    pub id: WorkoutID,
    pub split: SplitId,
    pub sets: Sets,
    pub exercises: Vec<String>,
}

impl WorkoutTemplate {
    #[must_use]
    pub fn new(id: WorkoutID, split: SplitId, sets: Sets) -> Self {
        Self {
            id,
            split,
            sets,
            exercises: catalog::exercises(split)
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    #[must_use]
    pub fn blank_entries(&self) -> Vec<WorkoutEntry> {
        self.exercises.iter().map(WorkoutEntry::blank).collect()
    }
}

/// Workout the service returns after recording, together with the personal
/// records it improved.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWorkout {
    pub workout: Workout,
    pub improved_records: PersonalRecords,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub fn new(value: f64) -> Result<Self, MeasurementError> {
        non_negative(value).map(Self)
    }

    #[must_use]
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        parse_non_negative(raw).map(Self)
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(f64);

impl Reps {
    pub fn new(value: f64) -> Result<Self, MeasurementError> {
        non_negative(value).map(Self)
    }

    #[must_use]
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        parse_non_negative(raw).map(Self)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MeasurementError {
    #[error("Value must be a finite number of zero or more")]
    OutOfRange,
}

fn non_negative(value: f64) -> Result<f64, MeasurementError> {
    if !value.is_finite() || value < 0.0 {
        return Err(MeasurementError::OutOfRange);
    }
    // -0 is stored as 0
    Ok(value + 0.0)
}

fn parse_non_negative(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(|value| non_negative(value).ok())
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sets(u32);

impl Sets {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn for_minutes(minutes: SessionMinutes) -> Self {
        match minutes.0 {
            m if m <= 30.0 => Self(2),
            m if m <= 45.0 => Self(3),
            _ => Self(4),
        }
    }
}

impl From<u32> for Sets {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq)]
pub struct DaysPerWeek(u8);

impl DaysPerWeek {
    pub fn new(value: f64) -> Result<Self, InputError> {
        if !value.is_finite() || value.fract() != 0.0 || !(1.0..=6.0).contains(&value) {
            return Err(InputError::DaysOutOfRange);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let days = value as u8;
        Ok(Self(days))
    }

    #[must_use]
    pub fn schedule(self) -> Schedule {
        Schedule::for_days(i64::from(self.0))
    }
}

impl TryFrom<&str> for DaysPerWeek {
    type Error = InputError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f64>() {
            Ok(parsed_value) => DaysPerWeek::new(parsed_value),
            Err(_) => Err(InputError::DaysOutOfRange),
        }
    }
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct SessionMinutes(f64);

impl SessionMinutes {
    pub fn new(value: f64) -> Result<Self, InputError> {
        if !value.is_finite() || !(20.0..=180.0).contains(&value) {
            return Err(InputError::MinutesOutOfRange);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn sets(self) -> Sets {
        Sets::for_minutes(self)
    }
}

impl TryFrom<&str> for SessionMinutes {
    type Error = InputError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f64>() {
            Ok(parsed_value) => SessionMinutes::new(parsed_value),
            Err(_) => Err(InputError::MinutesOutOfRange),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Days per week must be between 1 and 6.")]
    DaysOutOfRange,
    #[error("Time must be at least 20 minutes (max 180).")]
    MinutesOutOfRange,
}
