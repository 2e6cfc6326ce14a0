use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use firstrep_domain as domain;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub split: String,
    pub sets: u32,
    pub exercises: Vec<Exercise>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: value.id.to_string(),
            created_at: value.created_at,
            split: value.split.to_string(),
            sets: value.sets.into(),
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = RecordError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            created_at: value.created_at,
            split: domain::SplitId::try_from(value.split.as_str())?,
            sets: value.sets.into(),
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub weight: Option<f64>,
    pub reps: Option<f64>,
    pub sets: u32,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            name: value.name.clone(),
            weight: value.weight.map(f64::from),
            reps: value.reps.map(f64::from),
            sets: value.sets.into(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = RecordError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            weight: value.weight.map(domain::Weight::new).transpose()?,
            reps: value.reps.map(domain::Reps::new).transpose()?,
            sets: value.sets.into(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PersonalRecord {
    pub weight: f64,
    pub reps: f64,
}

impl From<&domain::PersonalRecord> for PersonalRecord {
    fn from(value: &domain::PersonalRecord) -> Self {
        Self {
            weight: value.weight.into(),
            reps: value.reps.into(),
        }
    }
}

impl TryFrom<PersonalRecord> for domain::PersonalRecord {
    type Error = RecordError;

    fn try_from(value: PersonalRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            weight: domain::Weight::new(value.weight)?,
            reps: domain::Reps::new(value.reps)?,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecordError {
    #[error(transparent)]
    Split(#[from] domain::SplitIdError),
    #[error(transparent)]
    Measurement(#[from] domain::MeasurementError),
    #[error("{0}")]
    Format(String),
}

impl From<serde_json::Error> for RecordError {
    fn from(value: serde_json::Error) -> Self {
        Self::Format(value.to_string())
    }
}

pub fn history(history: &domain::History) -> Vec<Workout> {
    history.iter().map(Workout::from).collect()
}

pub fn personal_records(
    personal_records: &domain::PersonalRecords,
) -> BTreeMap<String, PersonalRecord> {
    personal_records
        .iter()
        .map(|(name, pr)| (name.clone(), PersonalRecord::from(pr)))
        .collect()
}

pub fn try_into_history(workouts: Vec<Workout>) -> Result<domain::History, RecordError> {
    Ok(domain::History::new(
        workouts
            .into_iter()
            .map(domain::Workout::try_from)
            .collect::<Result<Vec<_>, _>>()?,
    ))
}

/// Decodes a single stored workout.
pub fn decode_workout(value: Value) -> Result<domain::Workout, RecordError> {
    domain::Workout::try_from(serde_json::from_value::<Workout>(value)?)
}

/// Decodes a single stored personal record.
pub fn decode_personal_record(value: Value) -> Result<domain::PersonalRecord, RecordError> {
    domain::PersonalRecord::try_from(serde_json::from_value::<PersonalRecord>(value)?)
}

pub fn try_into_personal_records(
    records: BTreeMap<String, PersonalRecord>,
) -> Result<domain::PersonalRecords, RecordError> {
    records
        .into_iter()
        .map(|(name, pr)| domain::PersonalRecord::try_from(pr).map(|pr| (name, pr)))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::tests::data::{PERSONAL_RECORDS, WORKOUT, WORKOUTS};

    use super::*;

    #[test]
    fn test_workout_try_from() {
        assert_eq!(
            domain::Workout::try_from(Workout::from(&*WORKOUT)),
            Ok(WORKOUT.clone())
        );
    }

    #[test]
    fn test_workout_serde() {
        let obj = Workout::from(&*WORKOUT);
        let serialized = json!(obj);
        assert_eq!(
            serialized,
            json!({
                "id": "w_1",
                "createdAt": "2026-10-16T07:30:00Z",
                "split": "push",
                "sets": 3,
                "exercises": [
                    {"name": "Chest Press", "weight": 135.0, "reps": 10.0, "sets": 3},
                    {"name": "Shoulder Press", "weight": 50.0, "reps": null, "sets": 3},
                    {"name": "Incline Dumbbell Press", "weight": null, "reps": null, "sets": 3},
                    {"name": "Tricep Pushdown", "weight": null, "reps": null, "sets": 3}
                ]
            })
        );
        let deserialized: Workout = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, obj);
    }

    #[test]
    fn test_workout_deserialize_integer_reps() {
        let workout: Workout = serde_json::from_value(json!({
            "id": "w_1760000000000_9f2c",
            "createdAt": "2025-10-09T08:53:20.000Z",
            "split": "full",
            "sets": 2,
            "exercises": [{"name": "Plank", "weight": null, "reps": 60, "sets": 2}]
        }))
        .unwrap();
        let workout = domain::Workout::try_from(workout).unwrap();
        assert_eq!(workout.split, domain::SplitId::Full);
        assert_eq!(
            workout.exercises[0].reps,
            Some(domain::Reps::new(60.0).unwrap())
        );
    }

    #[test]
    fn test_workout_try_from_unknown_split() {
        let mut obj = Workout::from(&*WORKOUT);
        obj.split = "cardio".to_string();
        assert_eq!(
            domain::Workout::try_from(obj),
            Err(RecordError::Split(domain::SplitIdError::Unknown(
                "cardio".to_string()
            )))
        );
    }

    #[test]
    fn test_exercise_try_from_negative_weight() {
        assert_eq!(
            domain::Exercise::try_from(Exercise {
                name: "Plank".to_string(),
                weight: Some(-1.0),
                reps: None,
                sets: 2,
            }),
            Err(RecordError::Measurement(domain::MeasurementError::OutOfRange))
        );
    }

    #[test]
    fn test_decode_workout() {
        assert_eq!(
            decode_workout(json!(Workout::from(&*WORKOUT))),
            Ok(WORKOUT.clone())
        );
        assert!(matches!(
            decode_workout(json!({"id": "w_1"})),
            Err(RecordError::Format(_))
        ));
    }

    #[test]
    fn test_decode_personal_record() {
        assert_eq!(
            decode_personal_record(json!({"weight": 62.5, "reps": 5})),
            Ok(domain::PersonalRecord {
                weight: domain::Weight::new(62.5).unwrap(),
                reps: domain::Reps::new(5.0).unwrap(),
            })
        );
        assert_eq!(
            decode_personal_record(json!({"weight": -5, "reps": 1})),
            Err(RecordError::Measurement(domain::MeasurementError::OutOfRange))
        );
    }

    #[test]
    fn test_history_conversion() {
        assert_eq!(try_into_history(history(&WORKOUTS)), Ok(WORKOUTS.clone()));
    }

    #[test]
    fn test_personal_records_conversion() {
        let records = personal_records(&PERSONAL_RECORDS);
        assert_eq!(
            json!(records),
            json!({
                "Chest Press": {"weight": 135.0, "reps": 10.0},
                "Lat Pulldown": {"weight": 90.0, "reps": 12.0}
            })
        );
        assert_eq!(
            try_into_personal_records(records),
            Ok(PERSONAL_RECORDS.clone())
        );
    }
}
