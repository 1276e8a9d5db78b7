//! Synchronous connection layer over the embedded `SQLite` engine.
//!
//! A [`Connection`] owns one engine handle and maps auto-commit, commit,
//! rollback, savepoints and isolation changes onto `SQLite` commands. Targets
//! are validated before the engine opens them, and every statement is checked
//! against the one cursor shape the engine supports.
//!
//! ```no_run
//! use sqlite_conn::prelude::*;
//!
//! # fn main() -> Result<(), SqliteConnError> {
//! sqlite_conn::driver::register();
//! let mut conn = sqlite_conn::driver::connect("sqlite::memory:", &Properties::new())?;
//! conn.set_auto_commit(false)?;
//! conn.create_statement()?
//!     .execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY)")?;
//! let sp = conn.set_savepoint()?;
//! conn.rollback_to_savepoint(&sp)?;
//! conn.commit()?;
//! conn.close()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod driver;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod path;
pub mod prelude;
pub mod statement;
pub mod temporal;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;

pub use config::{ConnectOptions, Properties};
pub use connection::Connection;
pub use driver::{Driver, DriverRegistry};
pub use engine::{EngineHandle, SqliteHandle};
pub use error::{ErrorKind, SqliteConnError};
pub use types::{IsolationLevel, Savepoint};
