use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use firstrep_domain::StorageError;

use crate::{Backend, Key};

/// Keeps every value in its own JSON file inside a data directory.
///
/// New values are first written to staging files next to their targets. Only
/// when all of them are written, the current files are moved aside and the
/// staging files renamed into place. If one of these renames fails, the files
/// already replaced are restored. A process that dies in the middle of a write
/// can still leave a part of the values replaced.
///
/// The backend does not log, as it also persists the log entries.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: Key) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_ref()))
    }

    fn staging_path(&self, key: Key) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", key.as_ref()))
    }

    fn backup_path(&self, key: Key) -> PathBuf {
        self.dir.join(format!(".{}.json.bak", key.as_ref()))
    }

    /// Moves the current file aside and, if `staged`, the staging file into its
    /// place. Returns whether there was a current file.
    fn commit(&self, key: Key, staged: bool) -> Result<bool, StorageError> {
        let path = self.path(key);
        let backup_path = self.backup_path(key);
        let backup = match fs::rename(&path, &backup_path) {
            Ok(()) => true,
            Err(err) if err.kind() == io::ErrorKind::NotFound => false,
            Err(err) => return Err(unavailable(&path, &err)),
        };
        if staged {
            if let Err(err) = fs::rename(self.staging_path(key), &path) {
                if backup {
                    let _ = fs::rename(&backup_path, &path);
                }
                return Err(unavailable(&path, &err));
            }
        }
        Ok(backup)
    }

    fn roll_back(&self, key: Key, backup: bool) {
        let path = self.path(key);
        if backup {
            let _ = fs::rename(self.backup_path(key), &path);
        } else {
            let _ = fs::remove_file(&path);
        }
    }
}

fn unavailable(path: &Path, err: &io::Error) -> StorageError {
    StorageError::Unavailable(format!("{}: {err}", path.display()))
}

impl Backend for LocalStorage {
    fn get(&self, key: Key) -> Result<Option<String>, StorageError> {
        let path = self.path(key);
        match fs::read(&path) {
            // Invalid UTF-8 is passed on and rejected by the decoder like any other garbage.
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(unavailable(&path, &err)),
        }
    }

    fn write(&self, entries: &[(Key, Option<String>)]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|err| unavailable(&self.dir, &err))?;

        let entries = entries
            .iter()
            .map(|(key, value)| (*key, value.as_ref()))
            .collect::<BTreeMap<_, _>>();

        let mut staged = vec![];
        for (key, value) in &entries {
            if let Some(value) = value {
                let staging_path = self.staging_path(*key);
                if let Err(err) = fs::write(&staging_path, value) {
                    let _ = fs::remove_file(&staging_path);
                    for key in staged {
                        let _ = fs::remove_file(self.staging_path(key));
                    }
                    return Err(unavailable(&staging_path, &err));
                }
                staged.push(*key);
            }
        }

        let mut committed = vec![];
        for (key, value) in &entries {
            match self.commit(*key, value.is_some()) {
                Ok(backup) => committed.push((*key, backup)),
                Err(err) => {
                    for (key, backup) in committed.into_iter().rev() {
                        self.roll_back(key, backup);
                    }
                    for key in staged {
                        let _ = fs::remove_file(self.staging_path(key));
                    }
                    return Err(err);
                }
            }
        }

        for (key, backup) in committed {
            if backup {
                let _ = fs::remove_file(self.backup_path(key));
            }
        }

        Ok(())
    }
}
