#![forbid(unsafe_code)]

//! Configuration for the edit tracker.
//!
//! [`TrackerConfig`] carries the debounce window, the history capacity and
//! two behaviour switches. With the `policy-config` feature it can be
//! loaded from TOML or JSON; missing keys fall back to the defaults.
//!
//! ```toml
//! # rundo.toml
//! debounce_ms = 750
//! history_capacity = 50
//! clear_redo_on_commit = true
//! ```
//!
//! ```rust,ignore
//! let config = TrackerConfig::from_toml_file("rundo.toml")?;
//! ```

use std::fmt;
#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 2_000;

/// Default number of entries kept in each of the undo and redo queues.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Tunables for an [`EditTracker`](crate::undo::EditTracker).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct TrackerConfig {
    /// Quiet period after the last edit before it is committed (milliseconds).
    pub debounce_ms: u64,
    /// Maximum entries in each history queue.
    pub history_capacity: usize,
    /// Drop redo history whenever a new edit is committed.
    ///
    /// Off by default: redo entries survive new edits and may no longer fit
    /// the text they are replayed against.
    pub clear_redo_on_commit: bool,
    /// The host reports the tracker's own undo/redo edits back through the
    /// change notifications, as text widgets usually do. When set, the
    /// notification pair that follows a replayed edit is not recorded.
    pub host_echoes_edits: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            clear_redo_on_commit: false,
            host_echoes_edits: false,
        }
    }
}

impl TrackerConfig {
    /// Create a configuration with the given window and capacity.
    #[must_use]
    pub fn new(debounce_ms: u64, history_capacity: usize) -> Self {
        Self {
            debounce_ms,
            history_capacity,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_debounce_ms(mut self, millis: u64) -> Self {
        self.debounce_ms = millis;
        self
    }

    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_clear_redo_on_commit(mut self, enabled: bool) -> Self {
        self.clear_redo_on_commit = enabled;
        self
    }

    #[must_use]
    pub fn with_host_echoes_edits(mut self, enabled: bool) -> Self {
        self.host_echoes_edits = enabled;
        self
    }

    /// The debounce window as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "debounce_ms",
                value: 0,
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history_capacity",
                value: 0,
            });
        }
        Ok(())
    }

    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors from building or loading a [`TrackerConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// A value must be a positive integer.
    InvalidValue { field: &'static str, value: u64 },
    /// I/O error reading a config file.
    Io(std::io::Error),
    /// TOML or JSON could not be decoded.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, value } => {
                write!(f, "invalid {field}: {value} (must be positive)")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidValue { .. } | Self::Parse(_) => None,
        }
    }
}
