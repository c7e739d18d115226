//! Exclusive lock for the update cycle's read-modify-write.

use momo_traits::{MomoError, Result};
use std::{
    fs::{self, File, OpenOptions, TryLockError},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use tracing::{debug, warn};

/// An exclusive advisory lock held for the duration of an update cycle.
///
/// The lock is taken on `<history>.lock` with the OS file lock, so the kernel
/// releases it when the owning process exits, however it exits. A second
/// cycle fails with [`MomoError::Locked`] instead of interleaving writes.
///
/// The file itself stays on disk and holds the pid of the last owner. Its
/// presence alone means nothing; only a held lock blocks.
#[derive(Debug)]
pub struct CycleLock {
    path: PathBuf,
    file: File,
}

impl CycleLock {
    /// Lock file path guarding the history at `history_path`.
    #[must_use]
    pub fn path_for(history_path: &Path) -> PathBuf {
        let mut name = history_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        history_path.with_file_name(name)
    }

    /// Take the lock at `path` without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`MomoError::Locked`] if another handle holds the lock, or an
    /// I/O error if the lock file cannot be opened.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Never truncate before locking: the current owner's pid lives here.
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                let owner = fs::read_to_string(&path).unwrap_or_default();
                return Err(MomoError::Locked(format!(
                    "{} (held by pid {})",
                    path.display(),
                    owner.trim()
                )));
            }
            Err(TryLockError::Error(e)) => return Err(e.into()),
        }

        // From here on the guard releases the lock on every exit path.
        let mut lock = Self { path, file };
        lock.record_owner()?;
        debug!(path = %lock.path.display(), "acquired cycle lock");
        Ok(lock)
    }

    fn record_owner(&mut self) -> Result<()> {
        self.file.set_len(0)?;
        writeln!(self.file, "{}", process::id())?;
        self.file.flush()?;
        Ok(())
    }
}

impl Drop for CycleLock {
    fn drop(&mut self) {
        match self.file.unlock() {
            Ok(()) => debug!(path = %self.path.display(), "released cycle lock"),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to release cycle lock");
            }
        }
    }
}
