//! JSON document for moving the complete workout data between devices.
//!
//! ```json
//! {
//!   "version": "firstrep-v2",
//!   "exportedAt": "2026-10-18T07:30:00Z",
//!   "dayIndex": 5,
//!   "history": [ ... ],
//!   "prs": { ... }
//! }
//! ```
//!
//! On import, every top-level field is considered on its own. A field that is
//! missing or has the wrong type is skipped, the stored value then stays as
//! it is. The version is not checked.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use firstrep_domain as domain;
use serde::Serialize;
use serde_json::Value;

use crate::records;

pub const FILE_NAME: &str = "firstrep-export.json";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    version: String,
    exported_at: DateTime<Utc>,
    day_index: u64,
    history: Vec<records::Workout>,
    prs: BTreeMap<String, records::PersonalRecord>,
}

impl From<&domain::Snapshot> for Document {
    fn from(value: &domain::Snapshot) -> Self {
        Self {
            version: value.version.clone(),
            exported_at: value.exported_at,
            day_index: *value.rotation,
            history: records::history(&value.history),
            prs: records::personal_records(&value.personal_records),
        }
    }
}

/// Serializes a snapshot as pretty-printed JSON.
pub fn to_json(snapshot: &domain::Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Document::from(snapshot))
}

/// Extracts the importable parts of a document.
///
/// # Errors
///
/// Fails if the document is not a JSON object or if a present history or
/// personal record table contains an invalid entry.
pub fn from_json(document: &str) -> Result<domain::SnapshotImport, ImportError> {
    let Value::Object(mut fields) = serde_json::from_str::<Value>(document)? else {
        return Err(ImportError::NotAnObject);
    };

    let rotation = match fields.remove("dayIndex") {
        Some(Value::Number(number)) => number
            .as_u64()
            .map(domain::RotationCursor::new)
            .or_else(|| number.as_f64().map(domain::RotationCursor::from_number)),
        _ => None,
    };

    let history = match fields.remove("history") {
        Some(value @ Value::Array(_)) => {
            let workouts = serde_json::from_value::<Vec<records::Workout>>(value)
                .map_err(|err| ImportError::InvalidHistory(err.into()))?;
            Some(
                records::try_into_history(workouts)
                    .map_err(|err| ImportError::InvalidHistory(err.into()))?,
            )
        }
        _ => None,
    };

    let personal_records = match fields.remove("prs") {
        Some(value @ Value::Object(_)) => {
            let prs = serde_json::from_value::<BTreeMap<String, records::PersonalRecord>>(value)
                .map_err(|err| ImportError::InvalidPersonalRecords(err.into()))?;
            Some(
                records::try_into_personal_records(prs)
                    .map_err(|err| ImportError::InvalidPersonalRecords(err.into()))?,
            )
        }
        _ => None,
    };

    Ok(domain::SnapshotImport {
        rotation,
        history,
        personal_records,
    })
}

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("document is not an object")]
    NotAnObject,
    #[error("invalid history: {0}")]
    InvalidHistory(domain::BoxedError),
    #[error("invalid personal records: {0}")]
    InvalidPersonalRecords(domain::BoxedError),
}
