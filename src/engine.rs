use std::fmt;
use std::path::Path;
use std::time::Duration;

use rusqlite::OpenFlags;

use crate::error::SqliteConnError;
use crate::path::MEMORY_TARGET;

/// Command text the connection sends to the engine.
pub mod command {
    pub const BEGIN: &str = "BEGIN";
    pub const COMMIT: &str = "COMMIT";
    pub const ROLLBACK: &str = "ROLLBACK";

    #[must_use]
    pub fn savepoint(ident: &str) -> String {
        format!("SAVEPOINT {ident}")
    }

    #[must_use]
    pub fn release(ident: &str) -> String {
        format!("RELEASE SAVEPOINT {ident}")
    }

    #[must_use]
    pub fn rollback_to(ident: &str) -> String {
        format!("ROLLBACK TO SAVEPOINT {ident}")
    }

    #[must_use]
    pub fn read_uncommitted(on: bool) -> &'static str {
        if on {
            "PRAGMA read_uncommitted = ON"
        } else {
            "PRAGMA read_uncommitted = OFF"
        }
    }
}

/// Flags applied when the engine opens the database. Fixed for the handle's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineFlags {
    pub shared_cache: bool,
    pub read_only: bool,
}

/// The native engine a [`crate::Connection`] drives.
///
/// Implementations are not expected to be shared between threads without
/// outside serialization.
pub trait EngineHandle: Sized {
    /// # Errors
    /// Returns a resource error when the engine cannot open `path`.
    fn open(path: &Path, flags: EngineFlags) -> Result<Self, SqliteConnError>;

    /// Run one or more commands, discarding any rows.
    ///
    /// # Errors
    /// Returns the engine's error verbatim.
    fn execute(&mut self, sql: &str) -> Result<(), SqliteConnError>;

    /// # Errors
    /// Returns the engine's error verbatim.
    fn set_busy_timeout(&mut self, ms: u32) -> Result<(), SqliteConnError>;

    fn library_version(&self) -> String;

    /// # Errors
    /// Returns the engine's error verbatim; the handle is gone either way.
    fn close(self) -> Result<(), SqliteConnError>;
}

/// [`EngineHandle`] backed by a `rusqlite` connection.
pub struct SqliteHandle {
    conn: rusqlite::Connection,
}

impl SqliteHandle {
    /// Borrow the underlying `rusqlite` connection for statement work.
    #[must_use]
    pub fn connection(&self) -> &rusqlite::Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut rusqlite::Connection {
        &mut self.conn
    }
}

impl fmt::Debug for SqliteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteHandle")
            .field("path", &self.conn.path())
            .field("autocommit", &self.conn.is_autocommit())
            .finish()
    }
}

impl EngineHandle for SqliteHandle {
    fn open(path: &Path, flags: EngineFlags) -> Result<Self, SqliteConnError> {
        let mut open_flags = if flags.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
        };
        open_flags |= OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if flags.shared_cache {
            open_flags |= OpenFlags::SQLITE_OPEN_SHARED_CACHE;
        }

        let conn = if path == Path::new(MEMORY_TARGET) {
            rusqlite::Connection::open_in_memory_with_flags(open_flags)?
        } else {
            rusqlite::Connection::open_with_flags(path, open_flags)?
        };
        Ok(Self { conn })
    }

    fn execute(&mut self, sql: &str) -> Result<(), SqliteConnError> {
        self.conn
            .execute_batch(sql)
            .map_err(SqliteConnError::SqliteError)
    }

    fn set_busy_timeout(&mut self, ms: u32) -> Result<(), SqliteConnError> {
        self.conn
            .busy_timeout(Duration::from_millis(u64::from(ms)))
            .map_err(SqliteConnError::SqliteError)
    }

    fn library_version(&self) -> String {
        rusqlite::version().to_string()
    }

    fn close(self) -> Result<(), SqliteConnError> {
        self.conn
            .close()
            .map_err(|(_conn, e)| SqliteConnError::SqliteError(e))
    }
}
