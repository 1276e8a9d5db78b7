use crate::engine::{EngineHandle, command};
use crate::error::SqliteConnError;
use crate::types::Savepoint;

use super::Connection;

// Savepoints are not tracked locally. Releasing or rolling back to one the
// engine has already popped surfaces as the engine's own error.

impl<H: EngineHandle> Connection<H> {
    /// Create an anonymous savepoint numbered from this connection's counter.
    ///
    /// The counter advances even if the engine rejects the command, so
    /// numbers are never reused.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed or the sequence is
    /// exhausted (nothing is sent to the engine then), or the engine's error.
    pub fn set_savepoint(&mut self) -> Result<Savepoint, SqliteConnError> {
        self.ensure_open()?;
        let next = self.savepoint_counter.checked_add(1).ok_or_else(|| {
            SqliteConnError::StateError("savepoint sequence exhausted".into())
        })?;
        let savepoint = Savepoint::Anonymous(self.savepoint_counter);
        self.savepoint_counter = next;
        self.exec(&command::savepoint(&savepoint.identifier()))?;
        Ok(savepoint)
    }

    /// Create a savepoint under a caller-chosen name. Duplicates are left to
    /// the engine.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed, or the engine's error.
    pub fn set_named_savepoint(
        &mut self,
        name: impl Into<String>,
    ) -> Result<Savepoint, SqliteConnError> {
        self.ensure_open()?;
        let savepoint = Savepoint::Named(name.into());
        self.exec(&command::savepoint(&savepoint.identifier()))?;
        Ok(savepoint)
    }

    /// # Errors
    /// Returns a state error if the connection is closed, or the engine's error.
    pub fn release_savepoint(&mut self, savepoint: &Savepoint) -> Result<(), SqliteConnError> {
        self.exec(&command::release(&savepoint.identifier()))
    }

    /// # Errors
    /// Returns a state error if the connection is closed, or the engine's error.
    pub fn rollback_to_savepoint(&mut self, savepoint: &Savepoint) -> Result<(), SqliteConnError> {
        self.exec(&command::rollback_to(&savepoint.identifier()))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ConnectOptions;
    use crate::connection::Connection;
    use crate::error::{ErrorKind, SqliteConnError};
    use crate::test_utils::RecordingHandle;

    #[test]
    fn exhausted_sequence_is_a_state_error() -> Result<(), SqliteConnError> {
        let mut conn = Connection::<RecordingHandle>::open_with_engine(
            "sqlite::memory:",
            ":memory:",
            &ConnectOptions::default(),
        )?;
        let journal = conn.handle()?.journal();
        conn.savepoint_counter = u64::MAX - 1;

        assert_eq!(conn.set_savepoint()?.identifier(), format!("sp_{}", u64::MAX - 1));
        journal.clear();

        let err = conn.set_savepoint().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(err.to_string(), "savepoint sequence exhausted");
        assert_eq!(conn.savepoint_counter, u64::MAX);
        assert!(journal.commands().is_empty());

        // Named savepoints never touch the sequence.
        conn.set_named_savepoint("still_ok")?;
        Ok(())
    }
}
