use std::fmt;

use crate::config::ConnectOptions;
use crate::engine::{EngineFlags, EngineHandle, SqliteHandle};
use crate::error::SqliteConnError;
use crate::metadata::MetaData;
use crate::path;
use crate::temporal::DateEncoding;
use crate::types::{IsolationLevel, TransactionState};

/// One logical session bound to exactly one engine handle.
///
/// The handle is `Some` exactly while the connection is open. Every operation
/// other than [`Connection::is_closed`] and [`Connection::close`] fails with a
/// state error once it is gone. A connection is meant to be driven by one
/// caller at a time; nothing here locks.
pub struct Connection<H: EngineHandle = SqliteHandle> {
    pub(super) url: String,
    pub(super) read_only: bool,
    pub(super) handle: Option<H>,
    pub(super) meta: Option<MetaData>,
    pub(super) auto_commit: bool,
    pub(super) isolation: IsolationLevel,
    pub(super) busy_timeout_ms: u32,
    pub(super) savepoint_counter: u64,
    pub(super) shared_cache: bool,
    pub(super) date_encoding: DateEncoding,
}

impl Connection<SqliteHandle> {
    /// Open `target` (a file path or `:memory:`) with the bundled `SQLite` engine.
    ///
    /// # Errors
    /// Returns a configuration error if the target path is unusable and
    /// `SqliteConnError::SqliteError` if the engine fails to open it.
    pub fn open(
        url: impl Into<String>,
        target: &str,
        options: &ConnectOptions,
    ) -> Result<Self, SqliteConnError> {
        Self::open_with_engine(url, target, options)
    }
}

impl<H: EngineHandle> Connection<H> {
    /// Open `target` with an arbitrary engine implementation.
    ///
    /// # Errors
    /// Returns a configuration error if the target path is unusable and a
    /// resource error if the engine fails to open it or rejects the busy timeout.
    pub fn open_with_engine(
        url: impl Into<String>,
        target: &str,
        options: &ConnectOptions,
    ) -> Result<Self, SqliteConnError> {
        let url = url.into();
        let resolved = path::resolve(target)?;
        let flags = EngineFlags {
            shared_cache: options.shared_cache,
            read_only: resolved.read_only(),
        };

        let mut handle = H::open(resolved.path(), flags)?;
        handle.set_busy_timeout(options.busy_timeout_ms)?;

        tracing::debug!(
            url = %url,
            path = %resolved.path().display(),
            read_only = resolved.read_only(),
            shared_cache = options.shared_cache,
            "opened sqlite connection"
        );

        Ok(Self {
            url,
            read_only: resolved.read_only(),
            handle: Some(handle),
            meta: None,
            auto_commit: true,
            isolation: IsolationLevel::Serializable,
            busy_timeout_ms: options.busy_timeout_ms,
            savepoint_counter: 0,
            shared_cache: options.shared_cache,
            date_encoding: options.date_encoding(),
        })
    }

    /// Close metadata and the engine handle. Calling it again is a no-op.
    ///
    /// # Errors
    /// Returns the engine's error if closing the handle fails; the connection
    /// is considered closed regardless.
    pub fn close(&mut self) -> Result<(), SqliteConnError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        if let Some(mut meta) = self.meta.take() {
            meta.close();
        }
        tracing::debug!(url = %self.url, "closing sqlite connection");
        handle.close()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }

    pub(super) fn ensure_open(&self) -> Result<(), SqliteConnError> {
        if self.handle.is_none() {
            return Err(SqliteConnError::closed());
        }
        Ok(())
    }

    /// Send one command to the engine.
    pub(super) fn exec(&mut self, sql: &str) -> Result<(), SqliteConnError> {
        let handle = self.handle.as_mut().ok_or_else(SqliteConnError::closed)?;
        tracing::trace!(sql, "sqlite command");
        handle.execute(sql)
    }

    /// Live engine handle, for statement and metadata collaborators.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn handle(&self) -> Result<&H, SqliteConnError> {
        self.handle.as_ref().ok_or_else(SqliteConnError::closed)
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn handle_mut(&mut self) -> Result<&mut H, SqliteConnError> {
        self.handle.as_mut().ok_or_else(SqliteConnError::closed)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the database file was read-only when the connection opened.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn auto_commit(&self) -> Result<bool, SqliteConnError> {
        self.ensure_open()?;
        Ok(self.auto_commit)
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn transaction_state(&self) -> Result<TransactionState, SqliteConnError> {
        self.ensure_open()?;
        Ok(if self.auto_commit {
            TransactionState::AutoCommit
        } else {
            TransactionState::InTransaction
        })
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn isolation_level(&self) -> Result<IsolationLevel, SqliteConnError> {
        self.ensure_open()?;
        Ok(self.isolation)
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn busy_timeout(&self) -> Result<u32, SqliteConnError> {
        self.ensure_open()?;
        Ok(self.busy_timeout_ms)
    }

    /// Change how long a blocked write waits for a lock before failing.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed, or the engine's error.
    pub fn set_busy_timeout(&mut self, ms: u32) -> Result<(), SqliteConnError> {
        let handle = self.handle.as_mut().ok_or_else(SqliteConnError::closed)?;
        handle.set_busy_timeout(ms)?;
        self.busy_timeout_ms = ms;
        Ok(())
    }

    #[must_use]
    pub fn shared_cache(&self) -> bool {
        self.shared_cache
    }

    /// Date/time storage format selected by the `julian_day` option.
    ///
    /// This is the boundary the value-marshalling layer reads when it binds
    /// or decodes temporal values through [`crate::temporal`]; the connection
    /// itself never converts dates. Fixed at open and still readable after
    /// close, like `url`, `is_read_only` and `shared_cache`.
    #[must_use]
    pub fn date_encoding(&self) -> DateEncoding {
        self.date_encoding
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn library_version(&self) -> Result<String, SqliteConnError> {
        Ok(self.handle()?.library_version())
    }

    /// Metadata for this connection, created on first use.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn meta_data(&mut self) -> Result<&MetaData, SqliteConnError> {
        let handle = self.handle.as_ref().ok_or_else(SqliteConnError::closed)?;
        let meta = self
            .meta
            .get_or_insert_with(|| MetaData::new(&self.url, handle.library_version()));
        Ok(meta)
    }
}

impl<H: EngineHandle> Drop for Connection<H> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(url = %self.url, error = %e, "error closing sqlite connection on drop");
        }
    }
}

impl<H: EngineHandle + fmt::Debug> fmt::Debug for Connection<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("url", &self.url)
            .field("read_only", &self.read_only)
            .field("handle", &self.handle)
            .field("auto_commit", &self.auto_commit)
            .field("isolation", &self.isolation)
            .field("busy_timeout_ms", &self.busy_timeout_ms)
            .field("savepoint_counter", &self.savepoint_counter)
            .finish_non_exhaustive()
    }
}
