use crate::engine::EngineHandle;
use crate::error::SqliteConnError;
use crate::statement::{PreparedStatement, Statement};
use crate::types::{Capability, CursorSpec, Holdability};

use super::Connection;

impl<H: EngineHandle> Connection<H> {
    /// Statement with the default forward-only, read-only, close-at-commit cursor.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn create_statement(&mut self) -> Result<Statement<'_, H>, SqliteConnError> {
        self.create_statement_with(CursorSpec::default())
    }

    /// # Errors
    /// Returns `SqliteConnError::Unsupported` for any cursor other than the
    /// default, checked before anything else, then a state error if closed.
    pub fn create_statement_with(
        &mut self,
        cursor: CursorSpec,
    ) -> Result<Statement<'_, H>, SqliteConnError> {
        cursor.validate()?;
        self.ensure_open()?;
        Ok(Statement::new(self, cursor))
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn prepare_statement(
        &mut self,
        sql: impl Into<String>,
    ) -> Result<PreparedStatement<'_, H>, SqliteConnError> {
        self.prepare_statement_with(sql, CursorSpec::default())
    }

    /// # Errors
    /// Returns `SqliteConnError::Unsupported` for any cursor other than the
    /// default, checked before anything else, then a state error if closed.
    pub fn prepare_statement_with(
        &mut self,
        sql: impl Into<String>,
        cursor: CursorSpec,
    ) -> Result<PreparedStatement<'_, H>, SqliteConnError> {
        cursor.validate()?;
        self.ensure_open()?;
        Ok(PreparedStatement::new(self, sql.into(), cursor))
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn holdability(&self) -> Result<Holdability, SqliteConnError> {
        self.ensure_open()?;
        Ok(Holdability::CloseAtCommit)
    }

    /// Only close-at-commit is accepted; there is nothing to store.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed, or
    /// `SqliteConnError::Unsupported` for any other holdability.
    pub fn set_holdability(&self, holdability: Holdability) -> Result<(), SqliteConnError> {
        self.ensure_open()?;
        if holdability != Holdability::CloseAtCommit {
            return Err(SqliteConnError::Unsupported(Capability::Holdability(
                holdability,
            )));
        }
        Ok(())
    }
}
