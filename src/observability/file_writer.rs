//! Size-rotated line writer for the trace file.
//!
//! Each exported span batch is one line. Once the file grows past its size
//! limit it is moved aside to `<name>.<unix-seconds>` and a fresh file is
//! started; only the newest few rotated files are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size limit before rotation (10 MB).
const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated files to keep.
const DEFAULT_MAX_BACKUPS: usize = 3;

/// Line writer with size-based rotation.
///
/// The file is opened lazily on first write and shared behind a `Mutex`, so
/// the exporter can be driven from any thread.
pub struct FileWriter {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    /// Writer for `path` with the default limits.
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS)
    }

    /// Writer for `path` rotating past `max_bytes` and keeping `max_backups`.
    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Fails if rotation, opening, writing or flushing fails, or if the lock
    /// was poisoned by a panicking writer.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer poisoned: {e}")))?;

        if self.is_full() {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = guard.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let now = chrono::Utc::now().timestamp();
        let stamp = self
            .backups()?
            .first()
            .map_or(now, |(newest, _)| now.max(newest + 1));

        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(stamp))?;
        }

        self.prune_backups()
    }

    fn backup_path(&self, stamp: i64) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{stamp}"));
        self.path.with_file_name(name)
    }

    /// Rotated files next to the trace file, newest first.
    fn backups(&self) -> io::Result<Vec<(i64, PathBuf)>> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let prefix = format!(
            "{}.",
            self.path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
        );

        let mut backups: Vec<(i64, PathBuf)> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let stamp = name.to_str()?.strip_prefix(&prefix)?.parse::<i64>().ok()?;
                Some((stamp, entry.path()))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(backups)
    }

    fn prune_backups(&self) -> io::Result<()> {
        for (_, stale) in self.backups()?.iter().skip(self.max_backups) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}
