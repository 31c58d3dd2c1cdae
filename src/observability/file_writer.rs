//! Append-only line writer with size-based rotation.
//!
//! When the active file grows past the size limit it is renamed to
//! `<stem>.json.<unix_secs>` and a fresh file is started. Only the newest
//! backups are retained.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// The file is opened lazily on the first write, so construction never fails.
///
/// ```rust
/// use patient_registry::observability::FileWriter;
///
/// let dir = tempfile::tempdir()?;
/// let writer = FileWriter::new(dir.path().join("traces.json"));
/// writer.write_line(r#"{"resourceSpans":[]}"#)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    /// Writer with the default limits (10 MB, 3 backups).
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Fails if the lock is poisoned or the rotation, open, write or flush
    /// fails.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *guard = Some(file);
        }
        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::other("No file available"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        let mut backup_path = self.file_path.with_extension(format!("json.{timestamp}"));
        // Two rotations within one second must not overwrite each other.
        let mut suffix = 1;
        while backup_path.exists() {
            backup_path = self
                .file_path
                .with_extension(format!("json.{timestamp}-{suffix}"));
            suffix += 1;
        }

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.prune_backups()
    }

    /// Deletes all but the newest `max_backups` backups.
    fn prune_backups(&self) -> io::Result<()> {
        let parent = self
            .file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let Some(file_name) = self.file_path.file_name().and_then(|s| s.to_str()) else {
            return Err(io::Error::other("Invalid file name"));
        };
        let backup_prefix = format!("{file_name}.");

        let mut backups: Vec<(PathBuf, Option<SystemTime>)> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&backup_prefix))
            })
            .map(|path| {
                let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
                (path, modified)
            })
            .collect();

        backups.sort_by(|(a_path, a_time), (b_path, b_time)| {
            b_time.cmp(a_time).then_with(|| b_path.cmp(a_path))
        });

        for (old_backup, _) in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups_in(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("traces.json."))
            .count()
    }

    #[test]
    fn test_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("one").unwrap();
        writer.write_line("two").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_rotates_and_prunes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.json");
        let writer = FileWriter::with_limits(path.clone(), 4, 2);

        for line in ["aaaaa", "bbbbb", "ccccc", "ddddd", "eeeee"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "eeeee\n");
        assert_eq!(backups_in(dir.path()), 2);
    }
}
