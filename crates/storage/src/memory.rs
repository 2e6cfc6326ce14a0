use std::{collections::BTreeMap, sync::Mutex};

use firstrep_domain::StorageError;

use crate::{Backend, Key};

/// Volatile backend, e.g. for tests or a session that should leave no trace.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<BTreeMap<Key, String>>,
}

impl Backend for MemoryStorage {
    fn get(&self, key: Key) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        Ok(values.get(&key).cloned())
    }

    fn write(&self, entries: &[(Key, Option<String>)]) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        for (key, value) in entries {
            match value {
                Some(value) => values.insert(*key, value.clone()),
                None => values.remove(key),
            };
        }
        Ok(())
    }
}
