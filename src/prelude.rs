//! Convenient imports for common functionality.

pub use crate::config::{ConnectOptions, ConnectOptionsBuilder, Properties};
pub use crate::connection::Connection;
pub use crate::driver::{Driver, DriverRegistry};
pub use crate::engine::{EngineFlags, EngineHandle, SqliteHandle};
pub use crate::error::{ErrorKind, SqliteConnError};
pub use crate::metadata::MetaData;
pub use crate::statement::{PreparedStatement, Statement};
pub use crate::temporal::DateEncoding;
pub use crate::types::{
    Capability, Concurrency, CursorSpec, Holdability, IsolationLevel, ResultSetType, Savepoint,
    TransactionState,
};
