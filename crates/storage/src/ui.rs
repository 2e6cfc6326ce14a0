use std::collections::VecDeque;

use firstrep_app::{
    OngoingWorkout, OngoingWorkoutRepository, Settings, SettingsRepository, log,
};

use crate::{Backend, Key, Store, encode};

impl<B: Backend> SettingsRepository for Store<B> {
    fn read_settings(&self) -> Result<Settings, String> {
        Ok(self
            .read(Key::Settings)
            .map_err(|err| err.to_string())?
            .unwrap_or_default())
    }

    fn write_settings(&self, settings: Settings) -> Result<(), String> {
        let value = encode(&settings).map_err(|err| err.to_string())?;
        self.write(&[(Key::Settings, Some(value))])
            .map_err(|err| err.to_string())
    }
}

impl<B: Backend> OngoingWorkoutRepository for Store<B> {
    fn read_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, String> {
        self.read(Key::OngoingWorkout)
            .map_err(|err| err.to_string())
    }

    fn write_ongoing_workout(&self, ongoing_workout: Option<OngoingWorkout>) -> Result<(), String> {
        let value = match ongoing_workout {
            Some(ongoing_workout) => Some(encode(&ongoing_workout).map_err(|err| err.to_string())?),
            None => None,
        };
        self.write(&[(Key::OngoingWorkout, value)])
            .map_err(|err| err.to_string())
    }
}

impl<B: Backend> log::Repository for Store<B> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        let raw = self
            .get(Key::Log)
            .map_err(|err| log::Error::Unknown(err.to_string()))?;
        Ok(raw
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default())
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(log::MAX_ENTRIES);
        let value = encode(&entries).map_err(|err| log::Error::Unknown(err.to_string()))?;
        self.write(&[(Key::Log, Some(value))])
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use firstrep_app::{WeightUnit, log::Repository as _};
    use pretty_assertions::assert_eq;

    use crate::MemoryStorage;

    use super::*;

    fn store() -> Store<MemoryStorage> {
        Store::new(MemoryStorage::default())
    }

    #[test]
    fn test_settings() {
        let store = store();
        assert_eq!(store.read_settings(), Ok(Settings::default()));
        let settings = Settings {
            days_per_week: 5,
            session_minutes: 30,
            weight_unit: WeightUnit::Kilograms,
        };
        store.write_settings(settings).unwrap();
        assert_eq!(store.read_settings(), Ok(settings));
    }

    #[test]
    fn test_settings_corrupt() {
        let store = store();
        store
            .backend()
            .write(&[(Key::Settings, Some("[]".to_string()))])
            .unwrap();
        assert_eq!(store.read_settings(), Ok(Settings::default()));
    }

    #[test]
    fn test_ongoing_workout() {
        let store = store();
        assert_eq!(store.read_ongoing_workout(), Ok(None));
        let ongoing_workout = OngoingWorkout {
            workout_id: "w_1".to_string(),
            split: "push".to_string(),
            sets: 3,
            exercises: vec!["Chest Press".to_string()],
            start_time: Utc.with_ymd_and_hms(2026, 10, 18, 7, 30, 0).unwrap(),
        };
        store
            .write_ongoing_workout(Some(ongoing_workout.clone()))
            .unwrap();
        assert_eq!(store.read_ongoing_workout(), Ok(Some(ongoing_workout)));
        store.write_ongoing_workout(None).unwrap();
        assert_eq!(store.read_ongoing_workout(), Ok(None));
        assert_eq!(store.backend().get(Key::OngoingWorkout).unwrap(), None);
    }

    #[test]
    fn test_log_entries() {
        let store = store();
        assert_eq!(store.read_entries(), Ok(VecDeque::new()));
        for i in 0..=log::MAX_ENTRIES {
            store
                .write_entry(log::Entry {
                    time: "Oct 18 07:30:00".to_string(),
                    level: ::log::Level::Info,
                    message: i.to_string(),
                })
                .unwrap();
        }
        let entries = store.read_entries().unwrap();
        assert_eq!(entries.len(), log::MAX_ENTRIES);
        assert_eq!(entries[0].message, log::MAX_ENTRIES.to_string());
        assert_eq!(entries[log::MAX_ENTRIES - 1].message, "1");
    }

    #[test]
    fn test_log_entries_corrupt() {
        let store = store();
        store
            .backend()
            .write(&[(Key::Log, Some("{".to_string()))])
            .unwrap();
        assert_eq!(store.read_entries(), Ok(VecDeque::new()));
    }
}
