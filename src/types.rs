use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SqliteConnError;

/// Standard transaction isolation levels a caller may request.
///
/// `SQLite` only honours [`IsolationLevel::Serializable`] (the default) and
/// [`IsolationLevel::ReadUncommitted`]; the rest exist so a request for them can
/// be rejected with a typed error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IsolationLevel {
    None,
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    #[default]
    Serializable,
}

impl IsolationLevel {
    /// Whether the engine can run at this level.
    #[must_use]
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Serializable | Self::ReadUncommitted)
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::ReadUncommitted => "READ UNCOMMITTED",
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Serializable => "SERIALIZABLE",
        };
        f.write_str(name)
    }
}

/// Whether the connection is wrapping each statement in its own transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    AutoCommit,
    InTransaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResultSetType {
    #[default]
    ForwardOnly,
    ScrollInsensitive,
    ScrollSensitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Concurrency {
    #[default]
    ReadOnly,
    Updatable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Holdability {
    HoldOverCommit,
    #[default]
    CloseAtCommit,
}

/// The (result type, concurrency, holdability) triple requested for a
/// statement's cursor.
///
/// The default value is the only triple the engine supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CursorSpec {
    pub result_type: ResultSetType,
    pub concurrency: Concurrency,
    pub holdability: Holdability,
}

impl CursorSpec {
    #[must_use]
    pub fn new(
        result_type: ResultSetType,
        concurrency: Concurrency,
        holdability: Holdability,
    ) -> Self {
        Self {
            result_type,
            concurrency,
            holdability,
        }
    }

    /// Two-argument form; holdability defaults to close-at-commit.
    #[must_use]
    pub fn with_type(result_type: ResultSetType, concurrency: Concurrency) -> Self {
        Self::new(result_type, concurrency, Holdability::CloseAtCommit)
    }

    /// Check the triple against what the engine supports.
    ///
    /// Pure; dimensions are checked in order result type, concurrency,
    /// holdability and the first mismatch is reported.
    ///
    /// # Errors
    /// Returns `SqliteConnError::Unsupported` naming the rejected dimension.
    pub fn validate(&self) -> Result<(), SqliteConnError> {
        if self.result_type != ResultSetType::ForwardOnly {
            return Err(SqliteConnError::Unsupported(Capability::ResultType(
                self.result_type,
            )));
        }
        if self.concurrency != Concurrency::ReadOnly {
            return Err(SqliteConnError::Unsupported(Capability::Concurrency(
                self.concurrency,
            )));
        }
        if self.holdability != Holdability::CloseAtCommit {
            return Err(SqliteConnError::Unsupported(Capability::Holdability(
                self.holdability,
            )));
        }
        Ok(())
    }
}

/// Which large-object factory was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LargeObjectKind {
    Blob,
    Clob,
    NClob,
    SqlXml,
}

/// How a prepared statement should report generated keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedKeys {
    Auto,
    ColumnIndexes(Vec<usize>),
    ColumnNames(Vec<String>),
}

/// Something a caller asked for that this connection layer does not provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    ResultType(ResultSetType),
    Concurrency(Concurrency),
    Holdability(Holdability),
    IsolationLevel(IsolationLevel),
    StoredProcedures,
    GeneratedKeys,
    TypeMap,
    ClientInfo,
    LargeObject(LargeObjectKind),
    Array,
    Struct,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResultType(rt) => {
                write!(f, "result set type {rt:?}; SQLite only supports forward-only cursors")
            }
            Self::Concurrency(c) => {
                write!(f, "concurrency {c:?}; SQLite only supports read-only cursors")
            }
            Self::Holdability(h) => {
                write!(f, "holdability {h:?}; SQLite only supports closing cursors at commit")
            }
            Self::IsolationLevel(level) => write!(
                f,
                "isolation level {level}; SQLite supports only SERIALIZABLE and READ UNCOMMITTED"
            ),
            Self::StoredProcedures => f.write_str("stored procedures"),
            Self::GeneratedKeys => f.write_str("generated key retrieval"),
            Self::TypeMap => f.write_str("type maps"),
            Self::ClientInfo => f.write_str("client info"),
            Self::LargeObject(kind) => write!(f, "{kind:?} factories"),
            Self::Array => f.write_str("array values"),
            Self::Struct => f.write_str("struct values"),
        }
    }
}

/// Marker inside a transaction that a rollback can target.
///
/// Anonymous savepoints carry the sequence number they were allocated with;
/// named ones carry the caller's name verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Savepoint {
    Anonymous(u64),
    Named(String),
}

impl Savepoint {
    /// Identifier sent to the engine.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            Savepoint::Anonymous(id) => format!("sp_{id}"),
            Savepoint::Named(name) => name.clone(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<u64> {
        match self {
            Savepoint::Anonymous(id) => Some(*id),
            Savepoint::Named(_) => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Savepoint::Anonymous(_) => None,
            Savepoint::Named(name) => Some(name),
        }
    }
}
