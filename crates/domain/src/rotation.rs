use derive_more::{Deref, Display};

use crate::{ReadError, Schedule, SplitId, UpdateError};

pub trait RotationService {
    fn get_rotation(&self) -> Result<RotationCursor, ReadError>;
    fn preview_next_split(&self, days: i64) -> Result<SplitId, ReadError>;
    fn reset_rotation(&self) -> Result<(), UpdateError>;
}

pub trait RotationRepository {
    fn read_rotation(&self) -> Result<RotationCursor, ReadError>;
    fn write_rotation(&self, cursor: RotationCursor) -> Result<(), UpdateError>;
}

/// Number of workouts generated since the rotation was last reset.
#[derive(Deref, Debug, Default, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RotationCursor(u64);

impl RotationCursor {
    pub const START: RotationCursor = RotationCursor(0);

    #[must_use]
    pub const fn new(position: u64) -> Self {
        Self(position)
    }

    /// Interprets a persisted cursor value.
    ///
    /// Absent, non-numeric, negative or fractional values yield the start of
    /// the rotation instead of an error.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::START;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::START;
        }
        trimmed
            .parse::<f64>()
            .map_or(Self::START, Self::from_number)
    }

    /// Interprets an arbitrary number, e.g. from an imported document.
    #[must_use]
    pub fn from_number(value: f64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let max = u64::MAX as f64;
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= max {
            return Self::START;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let position = value as u64;
        Self(position)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[must_use]
    pub fn split(self, schedule: &Schedule) -> SplitId {
        schedule.split_at(self.0)
    }
}

impl From<u64> for RotationCursor {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
