use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid store key {0:?}")]
    InvalidKey(String),
}

/// Persistent key-value store with one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let data = serde_json::to_vec(value)?;

        // Readers never see a half-written file, and concurrent writers of
        // one key each rename their own temp file.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&data)?;
        tmp.persist(&path).map_err(|err| err.error)?;
        tracing::debug!("stored {} at {}", key, path.display());
        Ok(())
    }

    /// Removing a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamp {
        albergue: String,
        day: u32,
    }

    #[test]
    fn missing_key_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("nested"));
        let value: Option<Stamp> = store.get_json("nothing_here").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn put_then_get_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("cache"));
        let stamp = Stamp {
            albergue: "Albergue de Peregrinos de Roncesvalles".into(),
            day: 1,
        };
        store.put_json("stamp_day_1", &stamp).unwrap();

        assert!(store.dir().join("stamp_day_1.json").exists());
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 1);
        assert_eq!(store.get_json::<Stamp>("stamp_day_1").unwrap(), Some(stamp));
    }

    #[test]
    fn put_overwrites_previous_value() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        store.put_json("counter", &1u32).unwrap();
        store.put_json("counter", &2u32).unwrap();
        assert_eq!(store.get_json::<u32>("counter").unwrap(), Some(2));
    }

    #[test]
    fn concurrent_writers_of_one_key_all_succeed() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("cache"));

        std::thread::scope(|scope| {
            for writer in 0..8u32 {
                let store = &store;
                scope.spawn(move || {
                    for round in 0..25u32 {
                        let stamp = Stamp {
                            albergue: format!("writer {writer}"),
                            day: round,
                        };
                        store.put_json("shared_key", &stamp).unwrap();
                    }
                });
            }
        });

        let last: Stamp = store.get_json("shared_key").unwrap().unwrap();
        assert_eq!(last.day, 24);
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        store.put_json("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get_json::<String>("k").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_a_serde_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        fs::write(tmp.path().join("broken.json"), "{not json").unwrap();
        assert!(matches!(
            store.get_json::<Stamp>("broken"),
            Err(StoreError::Serde(_))
        ));
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let store = FileStore::new("unused");
        for key in ["", "../etc/passwd", "a/b", ".hidden", "with space"] {
            assert!(
                matches!(store.put_json(key, &0u8), Err(StoreError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
