use crate::SplitId;

/// Exercises performed on a split, in the order they are done.
#[must_use]
pub fn exercises(split: SplitId) -> &'static [&'static str] {
    match split {
        SplitId::Push => &[
            "Chest Press",
            "Shoulder Press",
            "Incline Dumbbell Press",
            "Tricep Pushdown",
        ],
        SplitId::Pull => &["Lat Pulldown", "Seated Row", "Face Pull", "Bicep Curl"],
        SplitId::Legs | SplitId::Lower => &[
            "Leg Press",
            "Goblet Squat",
            "Hamstring Curl",
            "Calf Raises",
        ],
        SplitId::Upper => &[
            "Chest Press",
            "Lat Pulldown",
            "Shoulder Press",
            "Seated Row",
        ],
        SplitId::Full => &["Chest Press", "Lat Pulldown", "Leg Press", "Plank"],
        SplitId::Arms => &[
            "Bicep Curl",
            "Hammer Curl",
            "Tricep Pushdown",
            "Overhead Tricep Extension",
        ],
    }
}

/// Looks up exercises by split name, yielding no exercises for an unknown name.
#[must_use]
pub fn exercises_by_name(split: &str) -> &'static [&'static str] {
    SplitId::try_from(split).map(exercises).unwrap_or_default()
}
