//! Key/value storage backends

use std::collections::HashMap;

use crate::persistence::{PersistError, Result, Storage};

/// In-memory storage. Keeps the previous value of each key as its backup.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    backups: HashMap<String, String>,
}

impl MemoryStorage {
    /// Overwrite a value in place without rotating the backup
    #[cfg(test)]
    pub fn corrupt(&mut self, key: &str) {
        self.values.insert(key.to_string(), "\u{0}garbage".to_string());
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(old) = self.values.insert(key.to_string(), value.to_string()) {
            self.backups.insert(key.to_string(), old);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        self.backups.remove(key);
        Ok(())
    }

    fn get_backup(&self, key: &str) -> Result<Option<String>> {
        Ok(self.backups.get(key).cloned())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::*;

    /// One JSON file per key in a data directory.
    ///
    /// Writes go to `<key>.json.tmp` first and are renamed into place; the
    /// file being replaced is kept as `<key>.json.bak`.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        dir: PathBuf,
    }

    impl FileStorage {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path(&self, key: &str, suffix: &str) -> PathBuf {
            self.dir.join(format!("{}.json{}", key, suffix))
        }
    }

    fn read_optional(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistError::Io(e)),
        }
    }

    impl Storage for FileStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            read_optional(&self.path(key, ""))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            fs::create_dir_all(&self.dir)?;
            let primary = self.path(key, "");
            let tmp = self.path(key, ".tmp");
            let backup = self.path(key, ".bak");

            fs::write(&tmp, value)?;
            if primary.exists() {
                fs::rename(&primary, &backup)?;
            }
            fs::rename(&tmp, &primary)?;
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            for suffix in ["", ".bak", ".tmp"] {
                match fs::remove_file(self.path(key, suffix)) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(PersistError::Io(e)),
                }
            }
            Ok(())
        }

        fn get_backup(&self, key: &str) -> Result<Option<String>> {
            read_optional(&self.path(key, ".bak"))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::persistence;

        fn scratch_dir(name: &str) -> PathBuf {
            let dir = std::env::temp_dir().join(format!(
                "breaking-bricks-{}-{}",
                name,
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&dir);
            dir
        }

        #[test]
        fn test_file_round_trip_and_backup() {
            let dir = scratch_dir("files");
            let mut storage = FileStorage::new(&dir);

            assert_eq!(storage.get("k").unwrap(), None);
            storage.set("k", "one").unwrap();
            storage.set("k", "two").unwrap();
            assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
            assert_eq!(storage.get_backup("k").unwrap().as_deref(), Some("one"));
            assert!(!dir.join("k.json.tmp").exists());

            storage.remove("k").unwrap();
            assert_eq!(storage.get("k").unwrap(), None);
            assert_eq!(storage.get_backup("k").unwrap(), None);

            let _ = fs::remove_dir_all(&dir);
        }

        #[test]
        fn test_corrupt_file_recovers_from_backup() {
            let dir = scratch_dir("recover");
            let mut storage = FileStorage::new(&dir);

            persistence::save(&mut storage, "scores", &vec![1u64, 2, 3]).unwrap();
            persistence::save(&mut storage, "scores", &vec![4u64]).unwrap();
            fs::write(dir.join("scores.json"), "truncated{").unwrap();

            let loaded: Option<Vec<u64>> = persistence::load(&storage, "scores").unwrap();
            assert_eq!(loaded, Some(vec![1, 2, 3]));

            let _ = fs::remove_dir_all(&dir);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;

    /// Browser LocalStorage. Keeps no backups.
    pub struct LocalStorage {
        inner: web_sys::Storage,
    }

    impl LocalStorage {
        /// `None` when the page has no usable LocalStorage (private mode, sandboxed iframe)
        pub fn open() -> Option<Self> {
            let inner = web_sys::window()?.local_storage().ok()??;
            Some(Self { inner })
        }
    }

    fn backend(err: wasm_bindgen::JsValue) -> PersistError {
        PersistError::Backend(format!("{:?}", err))
    }

    impl Storage for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key).map_err(backend)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.inner.set_item(key, value).map_err(backend)
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.inner.remove_item(key).map_err(backend)
        }
    }
}
