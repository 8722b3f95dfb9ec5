//! Flat-file record storage.
//!
//! A [`RecordStore`] owns one backing file and is the only component
//! that touches it. Writers serialize on an exclusive advisory lock
//! (a sibling `.lock` file) held for the full duration of the
//! operation; rewrites replace the file via temp-then-rename so a
//! lock-less reader never observes a half-written file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use lectern_core::Result;
use lectern_core::error::StoreError;

use crate::codec;

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(25);

/// One segment of the backing file.
enum Entry<R> {
    /// A segment that decoded into a record.
    Parsed(R),
    /// A segment this store does not understand. Skipped by scans,
    /// re-emitted verbatim by rewrites so unrelated data survives.
    Foreign(String),
}

/// A collection of records backed by one delimited flat file.
///
/// The file may not exist (an empty collection); it is created lazily on
/// first append. Edits and deletions rewrite the entire file, never a
/// byte range.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    path: PathBuf,
    lock_timeout: Duration,
    _record: PhantomData<fn() -> R>,
}

impl<R> RecordStore<R>
where
    R: Serialize + DeserializeOwned,
{
    /// Create a store over the given backing file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            _record: PhantomData,
        }
    }

    /// Override the bounded lock wait. Expiry surfaces as
    /// [`StoreError::Busy`].
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn access_error(&self, source: io::Error) -> StoreError {
        StoreError::Access {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    /// Acquire the exclusive advisory lock, waiting up to the configured
    /// bound. The lock is released when the returned handle drops.
    fn acquire_lock(&self) -> Result<File> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| self.access_error(e))?;

        let deadline = Instant::now() + self.lock_timeout;
        loop {
            match lock_file.try_lock_exclusive() {
                Ok(()) => return Ok(lock_file),
                Err(_) if Instant::now() < deadline => {
                    std::thread::sleep(LOCK_RETRY_INTERVAL);
                }
                Err(_) => {
                    return Err(StoreError::Busy {
                        path: self.path.clone(),
                    }
                    .into());
                }
            }
        }
    }

    fn read_contents(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.access_error(err).into()),
        }
    }

    fn load_entries(&self) -> Result<Vec<Entry<R>>> {
        let Some(contents) = self.read_contents()? else {
            return Ok(Vec::new());
        };

        let entries = codec::split_segments(&contents)
            .into_iter()
            .map(|segment| match codec::decode(&segment) {
                Ok(record) => Entry::Parsed(record),
                Err(err) => {
                    debug!(path = %self.path.display(), error = %err, "Skipping foreign segment");
                    Entry::Foreign(segment)
                }
            })
            .collect();

        Ok(entries)
    }

    /// Load every decodable record, in file (append) order.
    ///
    /// A missing file is an empty collection; an unreadable file is an
    /// access error. Segments that fail to decode are silently dropped.
    pub fn load_all(&self) -> Result<Vec<R>> {
        let records = self
            .load_entries()?
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::Parsed(record) => Some(record),
                Entry::Foreign(_) => None,
            })
            .collect();
        Ok(records)
    }

    /// Find the first record matching the predicate.
    pub fn find<P>(&self, predicate: P) -> Result<Option<R>>
    where
        P: Fn(&R) -> bool,
    {
        Ok(self.load_all()?.into_iter().find(|r| predicate(r)))
    }

    /// Append one record, holding the exclusive lock for the duration of
    /// the write so concurrent appenders never interleave.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn append(&self, record: &R) -> Result<()> {
        let encoded = codec::encode(record)?;
        let _lock = self.acquire_lock()?;
        self.append_locked(&encoded)
    }

    /// Append one record unless an existing record matches `conflict`.
    ///
    /// The lock is held across the scan and the append, so two
    /// concurrent callers with the same conflicting key cannot both
    /// pass the check. Returns `false` (and appends nothing) on
    /// conflict.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn append_unless<F>(&self, record: &R, conflict: F) -> Result<bool>
    where
        F: Fn(&R) -> bool,
    {
        let encoded = codec::encode(record)?;
        let _lock = self.acquire_lock()?;

        let has_conflict = self.load_all()?.iter().any(|existing| conflict(existing));
        if has_conflict {
            return Ok(false);
        }

        self.append_locked(&encoded)?;
        Ok(true)
    }

    fn append_locked(&self, encoded: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.access_error(e))?;

        file.write_all(codec::entry(encoded).as_bytes())
            .map_err(|e| self.write_error(e))?;
        file.sync_data().map_err(|e| self.write_error(e))?;

        debug!("Appended record");
        Ok(())
    }

    /// Rewrite the collection: every record matching `predicate` is fed
    /// to `transform`, which returns the replacement record or `None` to
    /// omit it. Non-matching records and foreign segments pass through.
    ///
    /// The exclusive lock is held for the whole load-transform-write
    /// span, so two concurrent rewrites cannot base themselves on the
    /// same stale state. The new contents become visible atomically via
    /// a temp-file rename. An error from `transform` aborts the entire
    /// rewrite with the file untouched.
    ///
    /// Returns `false` if no record matched the predicate.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn rewrite_where<P, T>(&self, predicate: P, mut transform: T) -> Result<bool>
    where
        P: Fn(&R) -> bool,
        T: FnMut(R) -> Result<Option<R>>,
    {
        let _lock = self.acquire_lock()?;

        let entries = self.load_entries()?;
        let mut found = false;
        let mut kept: Vec<String> = Vec::with_capacity(entries.len());

        for entry in entries {
            match entry {
                Entry::Foreign(raw) => kept.push(raw),
                Entry::Parsed(record) => {
                    if predicate(&record) {
                        found = true;
                        if let Some(updated) = transform(record)? {
                            kept.push(codec::encode(&updated)?);
                        }
                    } else {
                        kept.push(codec::encode(&record)?);
                    }
                }
            }
        }

        if !found {
            return Ok(false);
        }

        self.replace_contents(&codec::join_segments(&kept))?;
        debug!("Rewrote collection");
        Ok(true)
    }

    fn replace_contents(&self, contents: &str) -> Result<()> {
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, contents).map_err(|e| self.write_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.write_error(e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::Deserialize;
    use tempfile::TempDir;

    use lectern_core::Error;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: u32,
        body: String,
    }

    fn note(id: u32, body: &str) -> Note {
        Note {
            id,
            body: body.to_string(),
        }
    }

    fn store_in(dir: &TempDir) -> RecordStore<Note> {
        RecordStore::new(dir.path().join("notes.txt"))
    }

    #[test]
    fn missing_file_is_empty_collection() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn append_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append(&note(1, "first")).unwrap();
        assert_eq!(store.load_all().unwrap(), vec![note(1, "first")]);
    }

    #[test]
    fn load_preserves_append_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for i in 1..=3 {
            store.append(&note(i, "n")).unwrap();
        }
        let ids: Vec<u32> = store.load_all().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn file_ends_with_trailing_delimiter_line() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append(&note(1, "first")).unwrap();
        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(contents.ends_with("\n---\n"));
    }

    #[test]
    fn foreign_segments_are_skipped_by_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append(&note(1, "first")).unwrap();
        let mut contents = fs::read_to_string(store.path()).unwrap();
        contents.push_str("this is not json\n---\n");
        fs::write(store.path(), &contents).unwrap();
        store.append(&note(2, "second")).unwrap();

        let ids: Vec<u32> = store.load_all().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn foreign_segments_survive_rewrites() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append(&note(1, "first")).unwrap();
        let mut contents = fs::read_to_string(store.path()).unwrap();
        contents.push_str("{\"unknownShape\": true}\n---\n");
        fs::write(store.path(), &contents).unwrap();

        let found = store
            .rewrite_where(|n| n.id == 1, |mut n| {
                n.body = "edited".to_string();
                Ok(Some(n))
            })
            .unwrap();
        assert!(found);

        let after = fs::read_to_string(store.path()).unwrap();
        assert!(after.contains("{\"unknownShape\": true}"));
        assert_eq!(store.load_all().unwrap()[0].body, "edited");
    }

    #[test]
    fn rewrite_edits_only_the_match() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append(&note(1, "keep")).unwrap();
        store.append(&note(2, "change")).unwrap();
        store.append(&note(3, "keep")).unwrap();

        store
            .rewrite_where(|n| n.id == 2, |mut n| {
                n.body = "changed".to_string();
                Ok(Some(n))
            })
            .unwrap();

        let notes = store.load_all().unwrap();
        assert_eq!(notes[0], note(1, "keep"));
        assert_eq!(notes[1], note(2, "changed"));
        assert_eq!(notes[2], note(3, "keep"));
    }

    #[test]
    fn rewrite_with_none_deletes() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append(&note(1, "a")).unwrap();
        store.append(&note(2, "b")).unwrap();

        let found = store.rewrite_where(|n| n.id == 1, |_| Ok(None)).unwrap();
        assert!(found);

        let notes = store.load_all().unwrap();
        assert_eq!(notes, vec![note(2, "b")]);
    }

    #[test]
    fn rewrite_without_match_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append(&note(1, "a")).unwrap();
        let found = store.rewrite_where(|n| n.id == 9, |n| Ok(Some(n))).unwrap();
        assert!(!found);
    }

    #[test]
    fn transform_error_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append(&note(1, "a")).unwrap();
        store.append(&note(2, "b")).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let result = store.rewrite_where(|n| n.id == 2, |_| Err(Error::Forbidden));
        assert!(matches!(result, Err(Error::Forbidden)));

        let after = fs::read_to_string(store.path()).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn append_unless_rejects_conflicts() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.append_unless(&note(1, "a"), |n| n.id == 1).unwrap());
        assert!(!store.append_unless(&note(1, "dup"), |n| n.id == 1).unwrap());
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn concurrent_appends_lose_nothing() {
        const WRITERS: usize = 8;
        const APPENDS_PER_WRITER: usize = 5;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let handles: Vec<_> = (0..WRITERS)
            .map(|w| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..APPENDS_PER_WRITER {
                        store.append(&note((w * 100 + i) as u32, "x")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every record decodes and none were lost to interleaving.
        let notes = store.load_all().unwrap();
        assert_eq!(notes.len(), WRITERS * APPENDS_PER_WRITER);
    }

    #[test]
    fn concurrent_uniqueness_admits_one_record() {
        const WRITERS: usize = 8;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let handles: Vec<_> = (0..WRITERS)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.append_unless(&note(7, "same key"), |n| n.id == 7).unwrap()
                })
            })
            .collect();
        let appended: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(appended.iter().filter(|ok| **ok).count(), 1);
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn held_lock_surfaces_busy() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).with_lock_timeout(Duration::from_millis(100));

        // Hold the advisory lock through an independent handle.
        let lock_path = dir.path().join("notes.txt.lock");
        let holder = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .unwrap();
        holder.lock_exclusive().unwrap();

        let err = store.append(&note(1, "blocked")).unwrap_err();
        assert!(err.is_retryable());

        FileExt::unlock(&holder).unwrap();
        store.append(&note(1, "unblocked")).unwrap();
    }
}
