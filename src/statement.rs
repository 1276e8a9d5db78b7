//! Thin statements that borrow a connection and hand SQL to its engine.
//!
//! Parameter binding and result materialization live elsewhere; these types
//! exist so every statement is created through the cursor capability check.

use std::fmt;

use crate::connection::Connection;
use crate::engine::EngineHandle;
use crate::error::SqliteConnError;
use crate::types::CursorSpec;

pub struct Statement<'c, H: EngineHandle> {
    conn: &'c mut Connection<H>,
    cursor: CursorSpec,
}

impl<'c, H: EngineHandle> Statement<'c, H> {
    pub(crate) fn new(conn: &'c mut Connection<H>, cursor: CursorSpec) -> Self {
        Self { conn, cursor }
    }

    #[must_use]
    pub fn cursor(&self) -> CursorSpec {
        self.cursor
    }

    /// Run one or more statements without returning rows.
    ///
    /// # Errors
    /// Returns a state error if the connection was closed, or the engine's error.
    pub fn execute_batch(&mut self, sql: &str) -> Result<(), SqliteConnError> {
        tracing::trace!(sql, "statement execute");
        self.conn.handle_mut()?.execute(sql)
    }

    /// The connection this statement was created from.
    pub fn connection(&mut self) -> &mut Connection<H> {
        self.conn
    }
}

impl<H: EngineHandle> fmt::Debug for Statement<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("url", &self.conn.url())
            .field("cursor", &self.cursor)
            .finish()
    }
}

pub struct PreparedStatement<'c, H: EngineHandle> {
    conn: &'c mut Connection<H>,
    sql: String,
    cursor: CursorSpec,
}

impl<'c, H: EngineHandle> PreparedStatement<'c, H> {
    pub(crate) fn new(conn: &'c mut Connection<H>, sql: String, cursor: CursorSpec) -> Self {
        Self { conn, sql, cursor }
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn cursor(&self) -> CursorSpec {
        self.cursor
    }

    /// # Errors
    /// Returns a state error if the connection was closed, or the engine's error.
    pub fn execute(&mut self) -> Result<(), SqliteConnError> {
        tracing::trace!(sql = %self.sql, "prepared statement execute");
        self.conn.handle_mut()?.execute(&self.sql)
    }
}

impl<H: EngineHandle> fmt::Debug for PreparedStatement<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedStatement")
            .field("sql", &self.sql)
            .field("cursor", &self.cursor)
            .finish()
    }
}
