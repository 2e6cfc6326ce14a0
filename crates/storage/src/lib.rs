#![warn(clippy::pedantic)]

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use firstrep_domain as domain;
use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;
pub mod records;
pub mod snapshot;

mod ui;

pub use local_storage::LocalStorage;
pub use memory::MemoryStorage;

/// Keys of the values kept by a [`Backend`].
#[derive(strum::AsRefStr, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    #[strum(serialize = "dayIndex")]
    Rotation,
    #[strum(serialize = "history")]
    History,
    #[strum(serialize = "prs")]
    PersonalRecords,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "ongoingWorkout")]
    OngoingWorkout,
    #[strum(serialize = "log")]
    Log,
}

/// Durable string values addressed by [`Key`].
#[allow(clippy::missing_errors_doc)]
pub trait Backend: Send + Sync + 'static {
    fn get(&self, key: Key) -> Result<Option<String>, domain::StorageError>;
    /// Sets all given values or none of them. A value of `None` removes the key.
    fn write(&self, entries: &[(Key, Option<String>)]) -> Result<(), domain::StorageError>;
}

type Pending = BTreeMap<Key, Option<String>>;

/// Implements all repositories on top of a [`Backend`].
///
/// Clones share the backend and any open [`transaction`](Store::transaction).
pub struct Store<B> {
    backend: Arc<B>,
    pending: Arc<Mutex<Option<Pending>>>,
}

impl<B> Clone for Store<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<B: Backend> Store<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            pending: Arc::default(),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs `f` and stores everything it writes through this store or one of
    /// its clones in a single backend write. Nothing is stored if `f` fails.
    ///
    /// Reads inside `f` see the values written before. A nested call joins the
    /// enclosing transaction.
    ///
    /// # Errors
    ///
    /// Returns the error of `f`, or a storage error if the backend write fails.
    pub fn transaction<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<domain::StorageError>,
    {
        let nested = {
            let mut pending = self.lock_pending()?;
            let nested = pending.is_some();
            if !nested {
                *pending = Some(Pending::new());
            }
            nested
        };
        if nested {
            return f();
        }

        let result = f();
        let entries = self.lock_pending()?.take().unwrap_or_default();
        match result {
            Ok(value) => {
                if !entries.is_empty() {
                    let entries = entries.into_iter().collect::<Vec<_>>();
                    self.backend.write(&entries)?;
                }
                Ok(value)
            }
            Err(err) => {
                debug!("discarding {} pending values", entries.len());
                Err(err)
            }
        }
    }

    fn lock_pending(&self) -> Result<MutexGuard<'_, Option<Pending>>, domain::StorageError> {
        self.pending
            .lock()
            .map_err(|err| domain::StorageError::Unavailable(err.to_string()))
    }

    fn get(&self, key: Key) -> Result<Option<String>, domain::StorageError> {
        if let Some(value) = self
            .lock_pending()?
            .as_ref()
            .and_then(|pending| pending.get(&key))
        {
            return Ok(value.clone());
        }
        self.backend.get(key)
    }

    fn write(&self, entries: &[(Key, Option<String>)]) -> Result<(), domain::StorageError> {
        let mut pending = self.lock_pending()?;
        match pending.as_mut() {
            Some(pending) => {
                pending.extend(entries.iter().cloned());
                Ok(())
            }
            None => self.backend.write(entries),
        }
    }

    /// Reads and decodes a value. Undecodable values are reported as absent.
    fn read<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, domain::StorageError> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("ignoring unreadable value of {}: {err}", key.as_ref());
                Ok(None)
            }
        }
    }

    fn load_history(&self) -> Result<domain::History, domain::StorageError> {
        let workouts = self.read::<Vec<Value>>(Key::History)?.unwrap_or_default();
        Ok(domain::History::new(
            workouts
                .into_iter()
                .filter_map(|workout| {
                    records::decode_workout(workout)
                        .inspect_err(|err| warn!("ignoring invalid workout: {err}"))
                        .ok()
                })
                .collect(),
        ))
    }

    fn load_personal_records(&self) -> Result<domain::PersonalRecords, domain::StorageError> {
        let records = self
            .read::<BTreeMap<String, Value>>(Key::PersonalRecords)?
            .unwrap_or_default();
        Ok(records
            .into_iter()
            .filter_map(|(name, record)| match records::decode_personal_record(record) {
                Ok(record) => Some((name, record)),
                Err(err) => {
                    warn!("ignoring invalid personal record of {name}: {err}");
                    None
                }
            })
            .collect())
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, domain::StorageError> {
    serde_json::to_string(value).map_err(|err| domain::StorageError::Other(err.into()))
}

impl<B: Backend> domain::RotationRepository for Store<B> {
    fn read_rotation(&self) -> Result<domain::RotationCursor, domain::ReadError> {
        let raw = self.get(Key::Rotation)?;
        let cursor = domain::RotationCursor::normalize(raw.as_deref());
        if let Some(raw) = raw {
            if cursor == domain::RotationCursor::START && raw.trim().parse::<u64>() != Ok(0) {
                warn!("ignoring invalid rotation cursor {raw:?}");
            }
        }
        Ok(cursor)
    }

    fn write_rotation(&self, cursor: domain::RotationCursor) -> Result<(), domain::UpdateError> {
        debug!("storing rotation cursor {cursor}");
        Ok(self.write(&[(Key::Rotation, Some(cursor.to_string()))])?)
    }
}

impl<B: Backend> domain::HistoryRepository for Store<B> {
    fn read_history(&self) -> Result<domain::History, domain::ReadError> {
        Ok(self.load_history()?)
    }

    fn write_history(&self, history: &domain::History) -> Result<(), domain::UpdateError> {
        Ok(self.write(&[(Key::History, Some(encode(&records::history(history))?))])?)
    }
}

impl<B: Backend> domain::PersonalRecordRepository for Store<B> {
    fn read_personal_records(&self) -> Result<domain::PersonalRecords, domain::ReadError> {
        Ok(self.load_personal_records()?)
    }
}

impl<B: Backend> domain::WorkoutRepository for Store<B> {
    fn write_workout_log(
        &self,
        history: &domain::History,
        personal_records: &domain::PersonalRecords,
    ) -> Result<(), domain::UpdateError> {
        let entries = [
            (Key::History, Some(encode(&records::history(history))?)),
            (
                Key::PersonalRecords,
                Some(encode(&records::personal_records(personal_records))?),
            ),
        ];
        Ok(self.write(&entries)?)
    }
}

impl<B: Backend> domain::DataRepository for Store<B> {
    fn import_data(&self, data: &domain::SnapshotImport) -> Result<(), domain::UpdateError> {
        let mut entries = vec![];
        if let Some(rotation) = data.rotation {
            entries.push((Key::Rotation, Some(rotation.to_string())));
        }
        if let Some(history) = &data.history {
            entries.push((Key::History, Some(encode(&records::history(history))?)));
        }
        if let Some(personal_records) = &data.personal_records {
            entries.push((
                Key::PersonalRecords,
                Some(encode(&records::personal_records(personal_records))?),
            ));
        }
        Ok(self.write(&entries)?)
    }

    fn clear_data(&self) -> Result<(), domain::DeleteError> {
        Ok(self.write(&[
            (Key::Rotation, None),
            (Key::History, None),
            (Key::PersonalRecords, None),
        ])?)
    }
}

#[cfg(test)]
mod tests {
    pub mod data;

    use domain::{
        DataRepository, DataService, HistoryRepository, PersonalRecordRepository,
        RotationRepository, RotationService, WorkoutRepository, WorkoutService,
    };
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use data::{PERSONAL_RECORDS, ROTATION, WORKOUT, WORKOUTS};

    use super::*;

    #[fixture]
    fn store() -> Store<MemoryStorage> {
        Store::new(MemoryStorage::default())
    }

    fn set_raw(store: &Store<MemoryStorage>, key: Key, raw: &str) {
        store
            .backend()
            .write(&[(key, Some(raw.to_string()))])
            .unwrap();
    }

    #[rstest]
    fn test_read_empty_store(store: Store<MemoryStorage>) {
        assert_eq!(
            store.read_rotation().unwrap(),
            domain::RotationCursor::START
        );
        assert_eq!(store.read_history().unwrap(), domain::History::default());
        assert_eq!(
            store.read_personal_records().unwrap(),
            domain::PersonalRecords::default()
        );
    }

    #[rstest]
    fn test_rotation(store: Store<MemoryStorage>) {
        store.write_rotation(ROTATION).unwrap();
        assert_eq!(
            store.backend().get(Key::Rotation).unwrap(),
            Some("2".to_string())
        );
        assert_eq!(store.read_rotation().unwrap(), ROTATION);
    }

    #[rstest]
    #[case("abc", 0)]
    #[case("-1", 0)]
    #[case("2.5", 0)]
    #[case("", 0)]
    #[case(" 7 ", 7)]
    #[case("4.0", 4)]
    fn test_rotation_normalized(
        store: Store<MemoryStorage>,
        #[case] raw: &str,
        #[case] expected: u64,
    ) {
        set_raw(&store, Key::Rotation, raw);
        assert_eq!(
            store.read_rotation().unwrap(),
            domain::RotationCursor::new(expected)
        );
    }

    #[rstest]
    fn test_workout_log(store: Store<MemoryStorage>) {
        store
            .write_workout_log(&WORKOUTS, &PERSONAL_RECORDS)
            .unwrap();
        assert_eq!(store.read_history().unwrap(), WORKOUTS.clone());
        assert_eq!(
            store.read_personal_records().unwrap(),
            PERSONAL_RECORDS.clone()
        );
    }

    #[rstest]
    fn test_write_history(store: Store<MemoryStorage>) {
        let history = domain::History::new(vec![WORKOUT.clone()]);
        store.write_history(&history).unwrap();
        assert_eq!(store.read_history().unwrap(), history);
        assert_eq!(store.backend().get(Key::PersonalRecords).unwrap(), None);
    }

    #[rstest]
    #[case(Key::History, "not json")]
    #[case(Key::History, r#"{"id": "w_1"}"#)]
    #[case(Key::History, r#"[{"id": "w_1"}]"#)]
    #[case(Key::PersonalRecords, "[1, 2]")]
    #[case(Key::PersonalRecords, r#"{"Plank": {"weight": -5, "reps": 1}}"#)]
    fn test_corrupt_values_read_as_empty(
        store: Store<MemoryStorage>,
        #[case] key: Key,
        #[case] raw: &str,
    ) {
        set_raw(&store, key, raw);
        assert_eq!(store.read_history().unwrap(), domain::History::default());
        assert_eq!(
            store.read_personal_records().unwrap(),
            domain::PersonalRecords::default()
        );
    }

    #[rstest]
    fn test_invalid_entries_dropped_individually(store: Store<MemoryStorage>) {
        let mut cardio = records::Workout::from(&*WORKOUT);
        cardio.id = "w_0".to_string();
        cardio.split = "cardio".to_string();
        let history = json!([records::Workout::from(&*WORKOUT), cardio, {"id": "w_9"}]);
        set_raw(&store, Key::History, &history.to_string());
        let prs = json!({
            "Chest Press": {"weight": 135.0, "reps": 10.0},
            "Plank": {"weight": -5, "reps": 1},
            "Leg Press": "heavy"
        });
        set_raw(&store, Key::PersonalRecords, &prs.to_string());

        assert_eq!(
            store.read_history().unwrap(),
            domain::History::new(vec![WORKOUT.clone()])
        );
        assert_eq!(
            store
                .read_personal_records()
                .unwrap()
                .iter()
                .map(|(name, _)| name.as_str())
                .collect::<Vec<_>>(),
            vec!["Chest Press"]
        );

        let service = domain::Service::new(store.clone());
        let template = service.generate_template(3.0, 45.0).unwrap();
        let mut entries = template.blank_entries();
        entries[1] = domain::WorkoutEntry::new("Lat Pulldown", "100", "8");
        service
            .record_workout(template.id.clone(), template.split, template.sets, entries)
            .unwrap();

        let history = store.read_history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(&WORKOUT.id), Some(&*WORKOUT));
        let personal_records = store.read_personal_records().unwrap();
        assert_eq!(personal_records.len(), 2);
        assert!(personal_records.get("Chest Press").is_some());
        assert!(personal_records.get("Lat Pulldown").is_some());
    }

    #[rstest]
    fn test_weights_stored_exactly(store: Store<MemoryStorage>) {
        let record = domain::PersonalRecord {
            weight: domain::Weight::new(933.002_501_588_677_9).unwrap(),
            reps: domain::Reps::new(0.1 + 0.2).unwrap(),
        };
        let personal_records = [("Leg Press".to_string(), record)]
            .into_iter()
            .collect::<domain::PersonalRecords>();
        store
            .write_workout_log(&domain::History::default(), &personal_records)
            .unwrap();
        assert_eq!(store.read_personal_records().unwrap(), personal_records);
    }

    #[rstest]
    fn test_transaction(store: Store<MemoryStorage>) {
        let clone = store.clone();
        let value = store
            .transaction(|| -> Result<_, domain::UpdateError> {
                clone.write_rotation(ROTATION)?;
                clone.write_workout_log(&WORKOUTS, &PERSONAL_RECORDS)?;
                assert_eq!(store.backend().get(Key::Rotation).unwrap(), None);
                assert_eq!(store.read_rotation().unwrap(), ROTATION);
                store.transaction(|| clone.write_history(&domain::History::default()))?;
                assert_eq!(store.read_history().unwrap(), domain::History::default());
                assert_eq!(store.backend().get(Key::History).unwrap(), None);
                clone.write_history(&WORKOUTS)?;
                Ok(42)
            })
            .unwrap();
        assert_eq!(value, 42);
        assert_eq!(
            store.backend().get(Key::Rotation).unwrap(),
            Some("2".to_string())
        );
        assert_eq!(store.read_history().unwrap(), WORKOUTS.clone());
        assert_eq!(
            store.read_personal_records().unwrap(),
            PERSONAL_RECORDS.clone()
        );
    }

    #[rstest]
    fn test_transaction_failed(store: Store<MemoryStorage>) {
        store.write_rotation(ROTATION).unwrap();
        let result = store.transaction(|| -> Result<(), domain::UpdateError> {
            store.write_rotation(domain::RotationCursor::new(3))?;
            store.write_history(&WORKOUTS)?;
            Err(domain::UpdateError::Other("failed".into()))
        });
        assert!(result.is_err());
        assert_eq!(store.read_rotation().unwrap(), ROTATION);
        assert_eq!(store.read_history().unwrap(), domain::History::default());

        store.write_history(&WORKOUTS).unwrap();
        assert!(store.backend().get(Key::History).unwrap().is_some());
    }

    #[rstest]
    fn test_import_data_partial(store: Store<MemoryStorage>) {
        store
            .write_workout_log(&WORKOUTS, &PERSONAL_RECORDS)
            .unwrap();
        store
            .import_data(&domain::SnapshotImport {
                rotation: Some(ROTATION),
                history: None,
                personal_records: Some(domain::PersonalRecords::default()),
            })
            .unwrap();
        assert_eq!(store.read_rotation().unwrap(), ROTATION);
        assert_eq!(store.read_history().unwrap(), WORKOUTS.clone());
        assert_eq!(
            store.read_personal_records().unwrap(),
            domain::PersonalRecords::default()
        );
    }

    #[rstest]
    fn test_clear_data(store: Store<MemoryStorage>) {
        store.write_rotation(ROTATION).unwrap();
        store
            .write_workout_log(&WORKOUTS, &PERSONAL_RECORDS)
            .unwrap();
        set_raw(&store, Key::Settings, "{}");
        store.clear_data().unwrap();
        assert_eq!(store.backend().get(Key::Rotation).unwrap(), None);
        assert_eq!(store.backend().get(Key::History).unwrap(), None);
        assert_eq!(store.backend().get(Key::PersonalRecords).unwrap(), None);
        assert_eq!(
            store.backend().get(Key::Settings).unwrap(),
            Some("{}".to_string())
        );
    }

    #[test]
    fn test_workout_flow() {
        let service = domain::Service::new(store());

        let template = service.generate_template(3.0, 45.0).unwrap();
        assert_eq!(template.split, domain::SplitId::Full);
        assert_eq!(template.sets, domain::Sets::new(3));
        assert_eq!(
            template.exercises,
            vec!["Chest Press", "Lat Pulldown", "Leg Press", "Plank"]
        );
        assert_eq!(
            service.get_rotation().unwrap(),
            domain::RotationCursor::new(1)
        );

        let mut entries = template.blank_entries();
        entries[0] = domain::WorkoutEntry::new("Chest Press", "135", "10");
        let recorded = service
            .record_workout(template.id.clone(), template.split, template.sets, entries)
            .unwrap();
        assert_eq!(recorded.improved_records.len(), 1);

        let history = service.get_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].exercises.len(), 4);
        let record = *service
            .get_personal_records()
            .unwrap()
            .get("Chest Press")
            .unwrap();
        assert_eq!(f64::from(record.weight), 135.0);
        assert_eq!(f64::from(record.reps), 10.0);

        let snapshot = service.export_snapshot().unwrap();
        let document = snapshot::to_json(&snapshot).unwrap();

        let restored = domain::Service::new(store());
        restored
            .import_snapshot(snapshot::from_json(&document).unwrap())
            .unwrap();
        assert_eq!(restored.get_rotation().unwrap(), snapshot.rotation);
        assert_eq!(restored.get_history().unwrap(), snapshot.history);
        assert_eq!(
            restored.get_personal_records().unwrap(),
            snapshot.personal_records
        );

        assert!(service.delete_workout(&template.id).unwrap());
        assert!(service.get_history().unwrap().is_empty());
        assert_eq!(service.get_personal_records().unwrap().len(), 1);

        service.clear_all().unwrap();
        assert_eq!(
            service.get_rotation().unwrap(),
            domain::RotationCursor::START
        );
        assert!(service.get_personal_records().unwrap().is_empty());
    }
}
