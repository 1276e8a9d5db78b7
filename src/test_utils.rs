//! Engine double for exercising the connection state machine without `SQLite`.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::engine::{EngineFlags, EngineHandle};
use crate::error::SqliteConnError;

thread_local! {
    static FAIL_NEXT_OPEN: Cell<bool> = const { Cell::new(false) };
}

/// Everything a [`RecordingHandle`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Open { path: PathBuf, flags: EngineFlags },
    Execute(String),
    BusyTimeout(u32),
    Close,
}

/// Shared view of a handle's event log; stays readable after the handle closes.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<EngineEvent>>>);

impl Journal {
    fn push(&self, event: EngineEvent) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    #[must_use]
    pub fn events(&self) -> Vec<EngineEvent> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Only the command text passed to `execute`.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                EngineEvent::Execute(sql) => Some(sql),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// [`EngineHandle`] that records calls instead of touching a database.
#[derive(Debug)]
pub struct RecordingHandle {
    journal: Journal,
    fail_with: Option<String>,
    fail_only: Option<String>,
}

impl RecordingHandle {
    /// Make the next `open` on this thread fail with a resource error.
    pub fn fail_next_open() {
        FAIL_NEXT_OPEN.with(|f| f.set(true));
    }

    #[must_use]
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// Fail every subsequent `execute` with `message`, as a locked database would.
    pub fn fail_executes(&mut self, message: impl Into<String>) {
        self.fail_with = Some(message.into());
        self.fail_only = None;
    }

    /// Fail only executes whose text is exactly `sql`; everything else succeeds.
    pub fn fail_command(&mut self, sql: impl Into<String>, message: impl Into<String>) {
        self.fail_with = Some(message.into());
        self.fail_only = Some(sql.into());
    }

    pub fn succeed_executes(&mut self) {
        self.fail_with = None;
        self.fail_only = None;
    }
}

impl EngineHandle for RecordingHandle {
    fn open(path: &Path, flags: EngineFlags) -> Result<Self, SqliteConnError> {
        if FAIL_NEXT_OPEN.with(|f| f.replace(false)) {
            return Err(SqliteConnError::ResourceError(format!(
                "unable to open database file: {}",
                path.display()
            )));
        }
        let journal = Journal::default();
        journal.push(EngineEvent::Open {
            path: path.to_path_buf(),
            flags,
        });
        Ok(Self {
            journal,
            fail_with: None,
            fail_only: None,
        })
    }

    fn execute(&mut self, sql: &str) -> Result<(), SqliteConnError> {
        if let Some(message) = &self.fail_with
            && self.fail_only.as_deref().is_none_or(|only| only == sql)
        {
            return Err(SqliteConnError::ResourceError(message.clone()));
        }
        self.journal.push(EngineEvent::Execute(sql.to_string()));
        Ok(())
    }

    fn set_busy_timeout(&mut self, ms: u32) -> Result<(), SqliteConnError> {
        self.journal.push(EngineEvent::BusyTimeout(ms));
        Ok(())
    }

    fn library_version(&self) -> String {
        "3.0.0-recording".to_string()
    }

    fn close(self) -> Result<(), SqliteConnError> {
        self.journal.push(EngineEvent::Close);
        Ok(())
    }
}
