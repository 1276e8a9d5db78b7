//! Validation of the database target before the engine sees it.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::SqliteConnError;

/// Target string that selects a private in-memory database.
pub const MEMORY_TARGET: &str = ":memory:";

/// Where the engine should open, and whether it can write there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    path: PathBuf,
    read_only: bool,
    in_memory: bool,
}

impl ResolvedTarget {
    fn memory() -> Self {
        Self {
            path: PathBuf::from(MEMORY_TARGET),
            read_only: false,
            in_memory: true,
        }
    }

    /// Absolute path for file targets, `:memory:` otherwise.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    #[must_use]
    pub fn in_memory(&self) -> bool {
        self.in_memory
    }
}

/// Resolve `target` to something the engine can open.
///
/// # Errors
/// Returns `SqliteConnError::MissingDirectory` naming the topmost missing
/// ancestor when the parent chain is incomplete, and
/// `SqliteConnError::ConfigError` when the path cannot be absolutized or the
/// write probe fails.
pub fn resolve(target: &str) -> Result<ResolvedTarget, SqliteConnError> {
    if target == MEMORY_TARGET {
        return Ok(ResolvedTarget::memory());
    }

    let file = std::path::absolute(target).map_err(|e| {
        SqliteConnError::ConfigError(format!("opening db: '{target}': {e}"))
    })?;

    if let Some(parent) = file.parent()
        && !parent.exists()
    {
        return Err(SqliteConnError::MissingDirectory {
            target: target.to_string(),
            missing: topmost_missing(parent).to_path_buf(),
        });
    }

    if !file.exists() {
        probe_writable(&file).map_err(|e| {
            SqliteConnError::ConfigError(format!("opening db: '{target}': {e}"))
        })?;
    }

    let read_only = file.exists() && !can_write(&file);

    tracing::trace!(path = %file.display(), read_only, "resolved sqlite target");
    Ok(ResolvedTarget {
        path: file,
        read_only,
        in_memory: false,
    })
}

/// Whether this process can open `file` for writing. Permission bits alone
/// are not enough: root can write a 0444 file, and nobody else can write a
/// 0644 file owned by another user.
fn can_write(file: &Path) -> bool {
    OpenOptions::new().write(true).open(file).is_ok()
}

/// Walk up from a missing directory to the last one that is still missing.
fn topmost_missing(start: &Path) -> &Path {
    let mut missing = start;
    let mut up = start.parent();
    while let Some(dir) = up {
        if dir.exists() {
            break;
        }
        missing = dir;
        up = dir.parent();
    }
    missing
}

fn probe_writable(file: &Path) -> io::Result<()> {
    match ProbeFile::create(file) {
        Ok(probe) => {
            drop(probe);
            Ok(())
        }
        // Someone created it between the existence check and the probe.
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

/// Zero-length file created only to prove the directory is writable.
/// Removed when dropped, whichever way the probe exits.
struct ProbeFile {
    path: PathBuf,
    _file: File,
}

impl ProbeFile {
    fn create(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            _file: file,
        })
    }
}

impl Drop for ProbeFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove write probe");
        }
    }
}
