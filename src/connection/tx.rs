use crate::engine::{EngineHandle, command};
use crate::error::SqliteConnError;
use crate::types::{Capability, IsolationLevel};

use super::Connection;

impl<H: EngineHandle> Connection<H> {
    /// Switch between auto-commit and explicit transaction mode.
    ///
    /// Leaving auto-commit sends `BEGIN`; returning to it sends `COMMIT`.
    /// Asking for the current mode sends nothing.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed, or the engine's error
    /// (in which case the mode is left unchanged).
    pub fn set_auto_commit(&mut self, auto_commit: bool) -> Result<(), SqliteConnError> {
        self.ensure_open()?;
        if self.auto_commit == auto_commit {
            return Ok(());
        }
        self.exec(if auto_commit {
            command::COMMIT
        } else {
            command::BEGIN
        })?;
        self.auto_commit = auto_commit;
        Ok(())
    }

    /// Commit the open transaction and immediately begin the next one.
    ///
    /// If `COMMIT` succeeds but the follow-up `BEGIN` fails, the error is
    /// returned with the connection still reporting `InTransaction` while the
    /// engine is back in autocommit. Close the connection after such a failure.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed or in auto-commit
    /// mode, or the engine's error.
    pub fn commit(&mut self) -> Result<(), SqliteConnError> {
        self.ensure_in_transaction()?;
        self.exec(command::COMMIT)?;
        self.exec(command::BEGIN)
    }

    /// Roll back the open transaction and immediately begin the next one.
    ///
    /// A failed follow-up `BEGIN` leaves the same split as in [`Self::commit`].
    ///
    /// # Errors
    /// Returns a state error if the connection is closed or in auto-commit
    /// mode, or the engine's error.
    pub fn rollback(&mut self) -> Result<(), SqliteConnError> {
        self.ensure_in_transaction()?;
        self.exec(command::ROLLBACK)?;
        self.exec(command::BEGIN)
    }

    fn ensure_in_transaction(&self) -> Result<(), SqliteConnError> {
        self.ensure_open()?;
        if self.auto_commit {
            return Err(SqliteConnError::StateError(
                "database in auto-commit mode".into(),
            ));
        }
        Ok(())
    }

    /// Only `Serializable` and `ReadUncommitted` are accepted; they map to
    /// `PRAGMA read_uncommitted` off and on.
    ///
    /// # Errors
    /// Returns `SqliteConnError::Unsupported` for any other level, a state
    /// error if the connection is closed, or the engine's error. The stored
    /// level only changes on success.
    pub fn set_isolation_level(&mut self, level: IsolationLevel) -> Result<(), SqliteConnError> {
        self.ensure_open()?;
        let pragma = match level {
            IsolationLevel::Serializable => command::read_uncommitted(false),
            IsolationLevel::ReadUncommitted => command::read_uncommitted(true),
            other => {
                return Err(SqliteConnError::Unsupported(Capability::IsolationLevel(
                    other,
                )));
            }
        };
        self.exec(pragma)?;
        self.isolation = level;
        Ok(())
    }
}
