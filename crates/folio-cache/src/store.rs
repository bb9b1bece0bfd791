//! Filesystem storage for the TTL cache.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use folio_core::Result;
use folio_core::error::{InvalidInputError, StorageError};

/// Default time-to-live of a cache entry.
pub const DEFAULT_TTL_HOURS: i64 = 24;

fn map_io(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source: err,
    }
}

/// A stored value with the time it was written.
#[derive(Debug, Serialize, Deserialize)]
struct Entry<T> {
    stored_at: DateTime<Utc>,
    value: T,
}

/// Borrowing twin of [`Entry`] for writes.
#[derive(Serialize)]
struct EntryRef<'a, T> {
    stored_at: DateTime<Utc>,
    value: &'a T,
}

/// A directory of JSON files, one per key, each valid for a fixed time.
///
/// Entries carry no schema version. Anything that no longer parses is
/// treated as a miss and removed.
#[derive(Debug, Clone)]
pub struct TtlCache {
    root: PathBuf,
    ttl: Duration,
}

impl TtlCache {
    /// Create a cache in `root` with the given time-to-live.
    pub fn new(root: impl AsRef<Path>, ttl: Duration) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ttl,
        }
    }

    /// Create a cache in `root` with the default time-to-live.
    pub fn with_default_ttl(root: impl AsRef<Path>) -> Self {
        Self::new(root, Duration::hours(DEFAULT_TTL_HOURS))
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the path of the file holding `key`.
    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(InvalidInputError::Other {
                message: format!("invalid cache key '{}'", key),
            }
            .into());
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    /// Get the lock file path.
    fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| map_io(&self.root, e))?;
        Ok(())
    }

    /// Take the exclusive write lock. Released when the file is dropped.
    fn lock(&self) -> Result<File> {
        self.ensure_root()?;
        let path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| map_io(&path, e))?;
        file.lock_exclusive().map_err(|_| StorageError::Lock {
            path: path.display().to_string(),
        })?;
        Ok(file)
    }

    /// Read a fresh value. Missing, expired, and unparseable entries are
    /// all `Ok(None)`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get_at(key, Utc::now())
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn get_at<T: DeserializeOwned>(&self, key: &str, now: DateTime<Utc>) -> Result<Option<T>> {
        let path = self.entry_path(key)?;

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("cache miss");
                return Ok(None);
            }
            Err(e) => return Err(map_io(&path, e).into()),
        };

        let entry: Entry<T> = match serde_json::from_str(&json) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "discarding unreadable cache entry");
                self.remove(key)?;
                return Ok(None);
            }
        };

        // A ttl too large to add to the timestamp never expires.
        let expires = entry.stored_at.checked_add_signed(self.ttl);
        if expires.is_some_and(|expires| now >= expires) {
            debug!(stored_at = %entry.stored_at, "cache entry expired");
            return Ok(None);
        }

        trace!("cache hit");
        Ok(Some(entry.value))
    }

    /// Store a value, replacing any previous entry atomically.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.put_at(key, value, Utc::now())
    }

    #[instrument(skip(self, value), fields(root = %self.root.display()))]
    fn put_at<T: Serialize>(&self, key: &str, value: &T, stored_at: DateTime<Utc>) -> Result<()> {
        let path = self.entry_path(key)?;
        let json = serde_json::to_vec(&EntryRef { stored_at, value }).map_err(StorageError::from)?;

        let _lock = self.lock()?;
        let tmp = self.root.join(format!(".{}.{}.tmp", key, Uuid::new_v4()));
        let write = || -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp);
            return Err(map_io(&path, e).into());
        }

        debug!(bytes = json.len(), "cache entry stored");
        Ok(())
    }

    /// Remove an entry. Returns whether one existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let path = self.entry_path(key)?;
        let _lock = self.lock()?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_io(&path, e).into()),
        }
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }

        let _lock = self.lock()?;
        let mut removed = 0;
        let entries = fs::read_dir(&self.root).map_err(|e| map_io(&self.root, e))?;
        for entry in entries {
            let path = entry.map_err(|e| map_io(&self.root, e))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path).map_err(|e| map_io(&path, e))?;
                removed += 1;
            }
        }

        debug!(removed, "cache cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn put_then_get() {
        let dir = TempDir::new().unwrap();
        let cache = TtlCache::with_default_ttl(dir.path());

        cache.put("greeting", &vec!["hello".to_string()]).unwrap();
        let value: Option<Vec<String>> = cache.get("greeting").unwrap();

        assert_eq!(value, Some(vec!["hello".to_string()]));
    }

    #[test]
    fn missing_key_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = TtlCache::with_default_ttl(dir.path().join("not-yet-created"));

        let value: Option<u32> = cache.get("nothing").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn entries_expire() {
        let dir = TempDir::new().unwrap();
        let cache = TtlCache::with_default_ttl(dir.path());
        let stored = Utc::now() - Duration::hours(DEFAULT_TTL_HOURS) - Duration::minutes(1);

        cache.put_at("old", &1u32, stored).unwrap();

        assert_eq!(cache.get::<u32>("old").unwrap(), None);
        let just_before = stored + Duration::hours(DEFAULT_TTL_HOURS) - Duration::seconds(1);
        assert_eq!(cache.get_at::<u32>("old", just_before).unwrap(), Some(1));
    }

    #[test]
    fn zero_ttl_never_hits() {
        let dir = TempDir::new().unwrap();
        let cache = TtlCache::new(dir.path(), Duration::zero());

        cache.put("k", &1u32).unwrap();
        assert_eq!(cache.get::<u32>("k").unwrap(), None);
    }

    #[test]
    fn huge_ttl_never_expires() {
        let dir = TempDir::new().unwrap();
        let cache = TtlCache::new(dir.path(), Duration::hours(10_000_000_000));

        cache.put("k", &1u32).unwrap();
        assert_eq!(cache.get::<u32>("k").unwrap(), Some(1));

        let far_future = Utc::now() + Duration::days(365 * 1000);
        assert_eq!(cache.get_at::<u32>("k", far_future).unwrap(), Some(1));
    }

    #[test]
    fn corrupt_entry_is_discarded() {
        let dir = TempDir::new().unwrap();
        let cache = TtlCache::with_default_ttl(dir.path());
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();

        assert_eq!(cache.get::<u32>("broken").unwrap(), None);
        assert!(!dir.path().join("broken.json").exists());
    }

    #[test]
    fn wrong_shape_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = TtlCache::with_default_ttl(dir.path());

        cache.put("k", &"text").unwrap();
        assert_eq!(cache.get::<u32>("k").unwrap(), None);
    }

    #[test]
    fn remove_and_clear() {
        let dir = TempDir::new().unwrap();
        let cache = TtlCache::with_default_ttl(dir.path());

        cache.put("a", &1u32).unwrap();
        cache.put("b", &2u32).unwrap();
        cache.put("c", &3u32).unwrap();

        assert!(cache.remove("a").unwrap());
        assert!(!cache.remove("a").unwrap());
        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.get::<u32>("b").unwrap(), None);
    }

    #[test]
    fn keys_are_validated() {
        let dir = TempDir::new().unwrap();
        let cache = TtlCache::with_default_ttl(dir.path());

        assert!(cache.put("../escape", &1u32).is_err());
        assert!(cache.put("", &1u32).is_err());
        assert!(cache.put(".lock", &1u32).is_err());
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let cache = TtlCache::with_default_ttl(dir.path());

        cache.put("k", &1u32).unwrap();

        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }
}
