use std::collections::BTreeMap;

use crate::{ReadError, Reps, Weight, Workout};

pub trait PersonalRecordRepository {
    fn read_personal_records(&self) -> Result<PersonalRecords, ReadError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalRecord {
    pub weight: Weight,
    pub reps: Reps,
}

impl PersonalRecord {
    /// A heavier weight wins, at equal weight more reps win.
    #[must_use]
    pub fn beats(&self, current: &PersonalRecord) -> bool {
        self.weight > current.weight || (self.weight == current.weight && self.reps > current.reps)
    }
}

/// Best recorded pair per exercise name, iterated in ascending name order.
///
/// The table is only folded forward when workouts are recorded. Deleting a
/// workout does not lower a record it set.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PersonalRecords(BTreeMap<String, PersonalRecord>);

impl PersonalRecords {
    #[must_use]
    pub fn new(records: BTreeMap<String, PersonalRecord>) -> Self {
        Self(records)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PersonalRecord> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PersonalRecord)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces the record for `name` if `candidate` beats it or none exists.
    pub fn update(&mut self, name: &str, candidate: PersonalRecord) -> bool {
        match self.0.get(name) {
            Some(current) if !candidate.beats(current) => false,
            _ => {
                self.0.insert(name.to_string(), candidate);
                true
            }
        }
    }

    /// Folds all complete entries of a workout into the table and returns
    /// the records that changed.
    pub fn fold(&mut self, workout: &Workout) -> PersonalRecords {
        let mut improved = BTreeMap::new();
        for (name, candidate) in workout.personal_records() {
            if self.update(name, candidate) {
                improved.insert(name.to_string(), candidate);
            }
        }
        PersonalRecords(improved)
    }
}

impl<'a> IntoIterator for &'a PersonalRecords {
    type Item = (&'a String, &'a PersonalRecord);
    type IntoIter = std::collections::btree_map::Iter<'a, String, PersonalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, PersonalRecord)> for PersonalRecords {
    fn from_iter<T: IntoIterator<Item = (String, PersonalRecord)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
