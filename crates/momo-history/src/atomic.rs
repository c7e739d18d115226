//! Atomic replace-on-write.
//!
//! Writers stage content in a temporary file next to the target and rename it
//! over the target, so a concurrent reader sees either the complete previous
//! file or the complete new one.

use momo_traits::{MomoError, Result};
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};
use tempfile::NamedTempFile;

/// Write `path` atomically with content produced by `write`.
///
/// Missing parent directories are created. On error the target is untouched
/// and the temporary file is removed.
///
/// # Errors
///
/// Returns any error from `write` or from the filesystem.
pub fn write_atomic_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    write(staged.as_file_mut())?;
    staged.as_file_mut().flush()?;
    staged.as_file().sync_all()?;
    staged
        .persist(path)
        .map_err(|e| MomoError::Io(e.error))?;
    Ok(())
}

/// Write `contents` to `path` atomically.
///
/// # Errors
///
/// Returns an error if the file cannot be staged or renamed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    write_atomic_with(path, |file| Ok(file.write_all(contents)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");

        // Only the target remains in the directory.
        let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_failed_write_leaves_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_atomic(&path, b"keep").unwrap();

        let result = write_atomic_with(&path, |file| {
            file.write_all(b"partial")?;
            Err(MomoError::InvalidData("boom".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
