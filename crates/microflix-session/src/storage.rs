//! Key/value backends for the session store.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{StorageError, StorageResult};

/// Minimal string key/value storage.
pub trait SessionStorage {
    /// Value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the entries.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::io("read", path, err)),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|err| StorageError::io("create_dir", self.dir.clone(), err))?;
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        let mut file =
            fs::File::create(&staging).map_err(|err| StorageError::io("create", staging.clone(), err))?;
        restrict_to_owner(&staging)?;
        file.write_all(value.as_bytes())
            .map_err(|err| StorageError::io("write", staging.clone(), err))?;
        drop(file);
        fs::rename(&staging, &path).map_err(|err| StorageError::io("rename", path, err))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::io("remove", path, err)),
        }
    }
}

/// Entries hold bearer tokens, so only the owner may read them.
#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> StorageResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(|err| StorageError::io("set_permissions", path.to_path_buf(), err))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
const fn restrict_to_owner(_path: &Path) -> StorageResult<()> {
    Ok(())
}

/// Backend for contexts with no persistent storage, such as server-side
/// rendering. Every call fails, so loads are always absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl SessionStorage for UnavailableStorage {
    fn read(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable)
    }

    fn write(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo::storage::{LocalStorage, Storage};

    use super::SessionStorage;
    use crate::error::{StorageError, StorageResult};

    /// The browser's `localStorage`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserStorage;

    fn backend_error(err: &wasm_bindgen::JsValue) -> StorageError {
        StorageError::Backend(format!("{err:?}"))
    }

    impl SessionStorage for BrowserStorage {
        fn read(&self, key: &str) -> StorageResult<Option<String>> {
            LocalStorage::raw()
                .get_item(key)
                .map_err(|err| backend_error(&err))
        }

        fn write(&self, key: &str, value: &str) -> StorageResult<()> {
            LocalStorage::raw()
                .set_item(key, value)
                .map_err(|err| backend_error(&err))
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            LocalStorage::raw()
                .remove_item(key)
                .map_err(|err| backend_error(&err))
        }
    }
}
