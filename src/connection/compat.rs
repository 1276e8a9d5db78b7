//! Standard connection operations outside the lifecycle/transaction core.
//!
//! The trivial ones answer directly; everything the engine cannot do returns
//! `SqliteConnError::Unsupported` with the capability that was asked for.
//! All of them fail with a state error once the connection is closed.

use std::collections::HashMap;

use crate::engine::EngineHandle;
use crate::error::SqliteConnError;
use crate::statement::PreparedStatement;
use crate::types::{Capability, GeneratedKeys, LargeObjectKind};

use super::Connection;

impl<H: EngineHandle> Connection<H> {
    /// `SQLite` has no catalogs.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn catalog(&self) -> Result<Option<String>, SqliteConnError> {
        self.ensure_open()?;
        Ok(None)
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn set_catalog(&self, _catalog: &str) -> Result<(), SqliteConnError> {
        self.ensure_open()
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn native_sql<'s>(&self, sql: &'s str) -> Result<&'s str, SqliteConnError> {
        self.ensure_open()?;
        Ok(sql)
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn warnings(&self) -> Result<Option<String>, SqliteConnError> {
        self.ensure_open()?;
        Ok(None)
    }

    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn clear_warnings(&self) -> Result<(), SqliteConnError> {
        self.ensure_open()
    }

    /// Accepted and ignored: read-only status is decided when the file is opened.
    ///
    /// # Errors
    /// Returns a state error if the connection is closed.
    pub fn set_read_only(&self, _read_only: bool) -> Result<(), SqliteConnError> {
        self.ensure_open()
    }

    /// Whether the engine handle is still live. Never contacts the engine.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_closed()
    }

    /// # Errors
    /// A state error if the connection is closed, otherwise always
    /// `SqliteConnError::Unsupported`.
    pub fn prepare_call(
        &mut self,
        _sql: &str,
    ) -> Result<PreparedStatement<'_, H>, SqliteConnError> {
        self.ensure_open()?;
        Err(SqliteConnError::Unsupported(Capability::StoredProcedures))
    }

    /// # Errors
    /// A state error if the connection is closed, otherwise always
    /// `SqliteConnError::Unsupported`.
    pub fn prepare_statement_returning(
        &mut self,
        _sql: &str,
        _keys: GeneratedKeys,
    ) -> Result<PreparedStatement<'_, H>, SqliteConnError> {
        self.ensure_open()?;
        Err(SqliteConnError::Unsupported(Capability::GeneratedKeys))
    }

    /// # Errors
    /// A state error if the connection is closed, otherwise always
    /// `SqliteConnError::Unsupported`.
    pub fn type_map(&self) -> Result<HashMap<String, String>, SqliteConnError> {
        self.ensure_open()?;
        Err(SqliteConnError::Unsupported(Capability::TypeMap))
    }

    /// # Errors
    /// A state error if the connection is closed, otherwise always
    /// `SqliteConnError::Unsupported`.
    pub fn set_type_map(&mut self, _map: HashMap<String, String>) -> Result<(), SqliteConnError> {
        self.ensure_open()?;
        Err(SqliteConnError::Unsupported(Capability::TypeMap))
    }

    /// # Errors
    /// A state error if the connection is closed, otherwise always
    /// `SqliteConnError::Unsupported`.
    pub fn client_info(&self, _name: &str) -> Result<Option<String>, SqliteConnError> {
        self.ensure_open()?;
        Err(SqliteConnError::Unsupported(Capability::ClientInfo))
    }

    /// # Errors
    /// A state error if the connection is closed, otherwise always
    /// `SqliteConnError::Unsupported`.
    pub fn set_client_info(&mut self, _name: &str, _value: &str) -> Result<(), SqliteConnError> {
        self.ensure_open()?;
        Err(SqliteConnError::Unsupported(Capability::ClientInfo))
    }

    /// # Errors
    /// A state error if the connection is closed, otherwise always
    /// `SqliteConnError::Unsupported`.
    pub fn create_large_object(&self, kind: LargeObjectKind) -> Result<Vec<u8>, SqliteConnError> {
        self.ensure_open()?;
        Err(SqliteConnError::Unsupported(Capability::LargeObject(kind)))
    }

    /// # Errors
    /// A state error if the connection is closed, otherwise always
    /// `SqliteConnError::Unsupported`.
    pub fn create_array_of(
        &self,
        _type_name: &str,
        _elements: &[String],
    ) -> Result<Vec<String>, SqliteConnError> {
        self.ensure_open()?;
        Err(SqliteConnError::Unsupported(Capability::Array))
    }

    /// # Errors
    /// A state error if the connection is closed, otherwise always
    /// `SqliteConnError::Unsupported`.
    pub fn create_struct(
        &self,
        _type_name: &str,
        _attributes: &[String],
    ) -> Result<Vec<String>, SqliteConnError> {
        self.ensure_open()?;
        Err(SqliteConnError::Unsupported(Capability::Struct))
    }
}
