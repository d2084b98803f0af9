//! Single-instance guard backed by an advisory file lock.
//!
//! Two bot processes polling the same token steal each other's updates, so
//! startup takes an exclusive, non-blocking lock on a well-known file and
//! holds it for the life of the process. The lock is local to one machine.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Opens retried when the lock file is swapped out underneath us.
const MAX_ATTEMPTS: usize = 3;

#[derive(Error, Debug)]
pub enum LockError {
    #[error("another instance already holds {}", path.display())]
    AlreadyRunning { path: PathBuf },

    #[error("lock file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// RAII guard that holds the instance lock.
///
/// Dropping it removes the lock file and releases the lock.
#[derive(Debug)]
pub struct InstanceLock {
    file: File,
    path: PathBuf,
}

impl InstanceLock {
    /// Try to become the only running instance.
    ///
    /// Never blocks: if another process holds the lock this returns
    /// [`LockError::AlreadyRunning`] immediately.
    pub fn acquire(path: impl AsRef<Path>) -> Result<Self, LockError> {
        let path = path.as_ref().to_path_buf();
        let io_error = |source| LockError::Io {
            path: path.clone(),
            source,
        };

        for _ in 0..MAX_ATTEMPTS {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(&path)
                .map_err(io_error)?;

            if let Err(e) = file.try_lock_exclusive() {
                if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                    return Err(LockError::AlreadyRunning { path });
                }
                return Err(io_error(e));
            }

            // A releasing holder unlinks the file before unlocking, so the
            // inode we opened may no longer be the one at `path`.
            if !still_linked(&file, &path).map_err(io_error)? {
                debug!("Lock file {} was replaced while locking, retrying", path.display());
                continue;
            }

            // Only the holder rewrites the file, so the pid always names the owner.
            file.set_len(0).map_err(io_error)?;
            write!(file, "{}", std::process::id()).map_err(io_error)?;

            debug!("Acquired instance lock at {}", path.display());
            return Ok(Self { file, path });
        }

        Err(LockError::AlreadyRunning { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        // Remove while still holding the lock so a newcomer never locks a
        // file that is about to disappear.
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Failed to remove lock file {}: {}", self.path.display(), e);
        }
        let _ = FileExt::unlock(&self.file);
        debug!("Released instance lock at {}", self.path.display());
    }
}

/// Whether `file` is still the file linked at `path`.
#[cfg(unix)]
fn still_linked(file: &File, path: &Path) -> std::io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let held = file.metadata()?;
    match std::fs::metadata(path) {
        Ok(current) => Ok(held.dev() == current.dev() && held.ino() == current.ino()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

// Windows refuses to delete an open file, so the lock file cannot be replaced.
#[cfg(not(unix))]
fn still_linked(_file: &File, _path: &Path) -> std::io::Result<bool> {
    Ok(true)
}
