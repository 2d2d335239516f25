//! Simulator configuration.
//!
//! Small by design: the pipeline shape itself is fixed, so the only knobs
//! are the cycle safety limit and whether operand forwarding is enabled.
//! Configuration is built from [`Config::default`] or deserialized from a
//! JSON document; unknown fields are rejected so typos fail loudly.

use serde::Deserialize;

/// Default cycle safety limit.
pub const DEFAULT_MAX_CYCLES: u64 = 1000;

/// Root configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Upper bound on simulated cycles before the run is aborted with
    /// [`crate::common::error::SimError::CycleLimitExceeded`].
    pub max_cycles: u64,
    /// Whether operand forwarding is active. When disabled the engine still
    /// computes forwarding decisions for trace output but executes with
    /// register-file values only.
    pub forwarding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
            forwarding: true,
        }
    }
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// Absent fields take their defaults; unknown fields are an error.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error on malformed input.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
