use crate::types::{CursorSpec, Holdability, IsolationLevel};

pub const DRIVER_NAME: &str = "sqlite-conn";
pub const DRIVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PRODUCT_NAME: &str = "SQLite";

/// Connection-scoped description of the driver and engine.
///
/// Created lazily by [`crate::Connection::meta_data`] and closed with the
/// connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaData {
    url: String,
    library_version: String,
    closed: bool,
}

impl MetaData {
    pub(crate) fn new(url: &str, library_version: String) -> Self {
        Self {
            url: url.to_string(),
            library_version,
            closed: false,
        }
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn driver_name(&self) -> &'static str {
        DRIVER_NAME
    }

    #[must_use]
    pub fn driver_version(&self) -> &'static str {
        DRIVER_VERSION
    }

    /// `native` while the owning connection is open, `unloaded` after.
    #[must_use]
    pub fn engine_status(&self) -> &'static str {
        if self.closed { "unloaded" } else { "native" }
    }

    #[must_use]
    pub fn database_product_name(&self) -> &'static str {
        PRODUCT_NAME
    }

    #[must_use]
    pub fn database_product_version(&self) -> &str {
        &self.library_version
    }

    #[must_use]
    pub fn supports_savepoints(&self) -> bool {
        true
    }

    #[must_use]
    pub fn default_isolation_level(&self) -> IsolationLevel {
        IsolationLevel::Serializable
    }

    #[must_use]
    pub fn supports_isolation_level(&self, level: IsolationLevel) -> bool {
        level.is_supported()
    }

    #[must_use]
    pub fn supports_cursor(&self, cursor: CursorSpec) -> bool {
        cursor.validate().is_ok()
    }

    #[must_use]
    pub fn result_set_holdability(&self) -> Holdability {
        Holdability::CloseAtCommit
    }
}
