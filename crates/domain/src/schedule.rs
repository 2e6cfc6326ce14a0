use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SplitId {
    Push,
    Pull,
    Legs,
    Upper,
    Lower,
    Full,
    Arms,
}

impl SplitId {
    pub const ALL: [SplitId; 7] = [
        SplitId::Push,
        SplitId::Pull,
        SplitId::Legs,
        SplitId::Upper,
        SplitId::Lower,
        SplitId::Full,
        SplitId::Arms,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SplitId::Push => "push",
            SplitId::Pull => "pull",
            SplitId::Legs => "legs",
            SplitId::Upper => "upper",
            SplitId::Lower => "lower",
            SplitId::Full => "full",
            SplitId::Arms => "arms",
        }
    }
}

impl TryFrom<&str> for SplitId {
    type Error = SplitIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        SplitId::ALL
            .into_iter()
            .find(|split| split.as_str() == value)
            .ok_or_else(|| SplitIdError::Unknown(value.to_string()))
    }
}

impl fmt::Display for SplitId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SplitIdError {
    #[error("Unknown split \"{0}\"")]
    Unknown(String),
}

const PUSH_PULL_LEGS: &[SplitId] = &[SplitId::Push, SplitId::Pull, SplitId::Legs];
const UPPER_LOWER_ARMS: &[SplitId] = &[SplitId::Upper, SplitId::Lower, SplitId::Arms];
const UPPER_LOWER: &[SplitId] = &[SplitId::Upper, SplitId::Lower];
const FULL_BODY: &[SplitId] = &[SplitId::Full];

/// Cyclic sequence of splits a user rotates through.
///
/// A schedule is never empty, so indexing it with any rotation position is
/// always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule(&'static [SplitId]);

impl Schedule {
    /// Selects the schedule for a weekly training frequency.
    ///
    /// Any frequency other than 4, 5 or 6 days (including values outside
    /// the supported range) falls back to the full body cycle.
    #[must_use]
    pub fn for_days(days: i64) -> Self {
        match days {
            6 => Self(PUSH_PULL_LEGS),
            5 => Self(UPPER_LOWER_ARMS),
            4 => Self(UPPER_LOWER),
            _ => Self(FULL_BODY),
        }
    }

    #[must_use]
    pub fn splits(&self) -> &'static [SplitId] {
        self.0
    }

    #[must_use]
    pub fn split_at(&self, position: u64) -> SplitId {
        #[allow(clippy::cast_possible_truncation)]
        let index = (position % self.0.len() as u64) as usize;
        self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, &[SplitId::Full])]
    #[case(2, &[SplitId::Full])]
    #[case(3, &[SplitId::Full])]
    #[case(4, &[SplitId::Upper, SplitId::Lower])]
    #[case(5, &[SplitId::Upper, SplitId::Lower, SplitId::Arms])]
    #[case(6, &[SplitId::Push, SplitId::Pull, SplitId::Legs])]
    #[case(0, &[SplitId::Full])]
    #[case(7, &[SplitId::Full])]
    #[case(-3, &[SplitId::Full])]
    #[case(i64::MAX, &[SplitId::Full])]
    fn test_schedule_for_days(#[case] days: i64, #[case] expected: &[SplitId]) {
        assert_eq!(Schedule::for_days(days).splits(), expected);
    }

    #[test]
    fn test_schedule_split_at() {
        let schedule = Schedule::for_days(6);
        assert_eq!(
            (0..7).map(|p| schedule.split_at(p)).collect::<Vec<_>>(),
            vec![
                SplitId::Push,
                SplitId::Pull,
                SplitId::Legs,
                SplitId::Push,
                SplitId::Pull,
                SplitId::Legs,
                SplitId::Push,
            ]
        );
        assert_eq!(schedule.split_at(u64::MAX), SplitId::Push);
        assert_eq!(Schedule::for_days(4).split_at(u64::MAX), SplitId::Lower);
    }

    #[test]
    fn test_schedule_never_empty() {
        for days in -1..=8 {
            assert!(!Schedule::for_days(days).splits().is_empty());
        }
    }

    #[test]
    fn test_split_id_try_from() {
        for split in SplitId::ALL {
            assert_eq!(SplitId::try_from(split.as_str()), Ok(split));
        }
        assert_eq!(
            SplitId::try_from("cardio"),
            Err(SplitIdError::Unknown("cardio".to_string()))
        );
        assert_eq!(
            SplitId::try_from("PUSH"),
            Err(SplitIdError::Unknown("PUSH".to_string()))
        );
    }

    #[rstest]
    #[case(SplitId::Push, "push")]
    #[case(SplitId::Arms, "arms")]
    fn test_split_id_display(#[case] split: SplitId, #[case] string: &str) {
        assert_eq!(split.to_string(), string);
    }
}
