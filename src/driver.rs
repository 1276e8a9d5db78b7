//! URL-based entry point and an explicit registry of drivers.
//!
//! Nothing registers itself: the hosting application calls [`register`] (or
//! builds its own [`DriverRegistry`]) during startup.

use std::sync::{Mutex, PoisonError};

use lazy_static::lazy_static;

use crate::config::{ConnectOptions, JULIAN_DAY_PROPERTY, Properties, SHARED_CACHE_PROPERTY};
use crate::connection::Connection;
use crate::engine::{EngineHandle, SqliteHandle};
use crate::error::SqliteConnError;
use crate::path::MEMORY_TARGET;

pub const URL_PREFIX: &str = "sqlite:";

/// Description of a property [`Driver::connect`] understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub default: &'static str,
    pub choices: &'static [&'static str],
    pub description: &'static str,
    pub required: bool,
}

/// Accepts `sqlite:<target>` URLs (prefix matched case-insensitively) and
/// opens connections for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    prefix: String,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(URL_PREFIX)
    }

    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn major_version(&self) -> u32 {
        env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0)
    }

    #[must_use]
    pub fn minor_version(&self) -> u32 {
        env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0)
    }

    #[must_use]
    pub fn accepts_url(&self, url: &str) -> bool {
        url.get(..self.prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(&self.prefix))
    }

    /// Target named by an accepted URL; a bare prefix means an in-memory database.
    fn target<'u>(&self, url: &'u str) -> &'u str {
        match url.get(self.prefix.len()..) {
            Some("") | None => MEMORY_TARGET,
            Some(rest) => rest,
        }
    }

    #[must_use]
    pub fn property_info(&self) -> Vec<PropertyInfo> {
        vec![
            PropertyInfo {
                name: SHARED_CACHE_PROPERTY,
                default: "false",
                choices: &["true", "false"],
                description: "Enable SQLite shared-cache mode.",
                required: false,
            },
            PropertyInfo {
                name: JULIAN_DAY_PROPERTY,
                default: "false",
                choices: &["true", "false"],
                description: "Store dates and times as julian day numbers.",
                required: false,
            },
        ]
    }

    /// Open a connection for `url`, or `Ok(None)` if the URL is not ours.
    ///
    /// # Errors
    /// Propagates configuration and engine errors from opening the connection.
    pub fn connect(
        &self,
        url: &str,
        props: &Properties,
    ) -> Result<Option<Connection<SqliteHandle>>, SqliteConnError> {
        self.connect_with_engine(url, props)
    }

    /// [`Driver::connect`] for an arbitrary engine implementation.
    ///
    /// # Errors
    /// Propagates configuration and engine errors from opening the connection.
    pub fn connect_with_engine<H: EngineHandle>(
        &self,
        url: &str,
        props: &Properties,
    ) -> Result<Option<Connection<H>>, SqliteConnError> {
        if !self.accepts_url(url) {
            return Ok(None);
        }
        let url = url.trim();
        let target = self.target(url);
        let options = ConnectOptions::from_properties(props);
        tracing::debug!(url, target, "driver connect");
        Connection::open_with_engine(url, target, &options).map(Some)
    }
}

/// Ordered set of drivers, at most one per URL prefix.
#[derive(Debug, Default)]
pub struct DriverRegistry {
    drivers: Vec<Driver>,
}

impl DriverRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `driver` unless one with the same prefix is already present.
    /// Returns whether it was added.
    pub fn register(&mut self, driver: Driver) -> bool {
        if self
            .drivers
            .iter()
            .any(|d| d.prefix.eq_ignore_ascii_case(&driver.prefix))
        {
            return false;
        }
        tracing::debug!(prefix = %driver.prefix, "registered sqlite driver");
        self.drivers.push(driver);
        true
    }

    #[must_use]
    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    #[must_use]
    pub fn driver_for(&self, url: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.accepts_url(url))
    }

    /// Connect through the first driver that accepts `url`.
    ///
    /// # Errors
    /// Returns `SqliteConnError::ConfigError` if no driver accepts the URL,
    /// otherwise whatever opening the connection returns.
    pub fn connect(
        &self,
        url: &str,
        props: &Properties,
    ) -> Result<Connection<SqliteHandle>, SqliteConnError> {
        self.connect_with_engine(url, props)
    }

    /// # Errors
    /// Returns `SqliteConnError::ConfigError` if no driver accepts the URL,
    /// otherwise whatever opening the connection returns.
    pub fn connect_with_engine<H: EngineHandle>(
        &self,
        url: &str,
        props: &Properties,
    ) -> Result<Connection<H>, SqliteConnError> {
        let driver = self
            .driver_for(url)
            .ok_or_else(|| SqliteConnError::ConfigError(format!("no suitable driver for '{url}'")))?;
        driver
            .connect_with_engine(url, props)?
            .ok_or_else(|| SqliteConnError::ConfigError(format!("no suitable driver for '{url}'")))
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: Mutex<DriverRegistry> = Mutex::new(DriverRegistry::new());
}

/// Register the default driver in the process-wide registry.
///
/// Idempotent; returns `true` only for the call that actually registered it.
pub fn register() -> bool {
    GLOBAL_REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .register(Driver::new())
}

/// Whether the process-wide registry has a driver for `url`.
#[must_use]
pub fn is_registered(url: &str) -> bool {
    GLOBAL_REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .driver_for(url)
        .is_some()
}

/// Connect through the process-wide registry.
///
/// # Errors
/// Returns `SqliteConnError::ConfigError` if [`register`] has not been called
/// for a matching driver, otherwise whatever opening the connection returns.
pub fn connect(url: &str, props: &Properties) -> Result<Connection<SqliteHandle>, SqliteConnError> {
    GLOBAL_REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .connect(url, props)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matches_case_insensitively() {
        let driver = Driver::new();
        assert!(driver.accepts_url("sqlite:/tmp/x.db"));
        assert!(driver.accepts_url("SQLite::memory:"));
        assert!(driver.accepts_url("sqlite:"));
        assert!(!driver.accepts_url("postgres://localhost"));
        assert!(!driver.accepts_url("sql"));
        assert!(!driver.accepts_url(""));
    }

    #[test]
    fn bare_prefix_targets_memory() {
        let driver = Driver::new();
        assert_eq!(driver.target("sqlite:"), MEMORY_TARGET);
        assert_eq!(driver.target("SQLITE:"), MEMORY_TARGET);
        assert_eq!(driver.target("sqlite:data/app.db"), "data/app.db");
        assert_eq!(driver.target("sqlite::memory:"), MEMORY_TARGET);
    }

    #[test]
    fn property_info_lists_both_flags() {
        let names: Vec<_> = Driver::new()
            .property_info()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["shared_cache", "julian_day"]);
    }

    #[test]
    fn registry_register_is_idempotent_per_prefix() {
        let mut registry = DriverRegistry::new();
        assert!(registry.register(Driver::new()));
        assert!(!registry.register(Driver::with_prefix("SQLITE:")));
        assert!(registry.register(Driver::with_prefix("lite:")));
        assert_eq!(registry.drivers().len(), 2);
        assert_eq!(
            registry.driver_for("lite:x.db").map(Driver::prefix),
            Some("lite:")
        );
    }

    #[test]
    fn registry_rejects_unknown_urls() {
        let registry = DriverRegistry::new();
        let err = registry
            .connect("sqlite::memory:", &Properties::new())
            .unwrap_err();
        assert!(matches!(err, SqliteConnError::ConfigError(_)));
    }
}
