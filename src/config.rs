use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::temporal::DateEncoding;

/// String property bag handed to the driver alongside a URL.
pub type Properties = HashMap<String, String>;

pub const SHARED_CACHE_PROPERTY: &str = "shared_cache";
pub const JULIAN_DAY_PROPERTY: &str = "julian_day";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 3000;

/// Options fixed for the lifetime of a connection.
///
/// `shared_cache` and `julian_day` have no setter once the connection is open;
/// the busy timeout is only the initial value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectOptions {
    pub shared_cache: bool,
    pub julian_day: bool,
    pub busy_timeout_ms: u32,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            shared_cache: false,
            julian_day: false,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl ConnectOptions {
    #[must_use]
    pub fn builder() -> ConnectOptionsBuilder {
        ConnectOptionsBuilder::default()
    }

    /// Read `shared_cache` and `julian_day` from a property bag.
    ///
    /// Only a case-insensitive `"true"` enables a flag; anything else,
    /// including a missing key, leaves it off.
    #[must_use]
    pub fn from_properties(props: &Properties) -> Self {
        Self {
            shared_cache: parse_flag(props.get(SHARED_CACHE_PROPERTY)),
            julian_day: parse_flag(props.get(JULIAN_DAY_PROPERTY)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn date_encoding(&self) -> DateEncoding {
        if self.julian_day {
            DateEncoding::JulianDay
        } else {
            DateEncoding::UnixMillis
        }
    }
}

fn parse_flag(value: Option<&String>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Fluent builder for [`ConnectOptions`].
#[derive(Debug, Clone, Default)]
pub struct ConnectOptionsBuilder {
    opts: ConnectOptions,
}

impl ConnectOptionsBuilder {
    #[must_use]
    pub fn shared_cache(mut self, shared_cache: bool) -> Self {
        self.opts.shared_cache = shared_cache;
        self
    }

    #[must_use]
    pub fn julian_day(mut self, julian_day: bool) -> Self {
        self.opts.julian_day = julian_day;
        self
    }

    #[must_use]
    pub fn busy_timeout_ms(mut self, ms: u32) -> Self {
        self.opts.busy_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn finish(self) -> ConnectOptions {
        self.opts
    }
}
