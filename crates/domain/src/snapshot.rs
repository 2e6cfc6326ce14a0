use chrono::{DateTime, Utc};

use crate::{DeleteError, History, PersonalRecords, ReadError, RotationCursor, UpdateError};

pub const SNAPSHOT_VERSION: &str = "firstrep-v2";

pub trait DataService {
    fn export_snapshot(&self) -> Result<Snapshot, ReadError>;
    fn import_snapshot(&self, data: SnapshotImport) -> Result<(), UpdateError>;
    fn clear_all(&self) -> Result<(), DeleteError>;
}

pub trait DataRepository {
    /// Replaces every present part of the stored data in one write.
    fn import_data(&self, data: &SnapshotImport) -> Result<(), UpdateError>;
    fn clear_data(&self) -> Result<(), DeleteError>;
}

/// Complete copy of the durable state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub rotation: RotationCursor,
    pub history: History,
    pub personal_records: PersonalRecords,
}

/// Parts of a snapshot to restore. Absent parts are left unchanged.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SnapshotImport {
    pub rotation: Option<RotationCursor>,
    pub history: Option<History>,
    pub personal_records: Option<PersonalRecords>,
}

impl SnapshotImport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rotation.is_none() && self.history.is_none() && self.personal_records.is_none()
    }
}

impl From<Snapshot> for SnapshotImport {
    fn from(value: Snapshot) -> Self {
        Self {
            rotation: Some(value.rotation),
            history: Some(value.history),
            personal_records: Some(value.personal_records),
        }
    }
}
