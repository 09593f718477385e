//! # Configuration Management
//!
//! Loads the list of tide pool locations and the HTTP retry policy from an
//! optional `tide-pools.toml` in the working directory. Without a file the
//! built-in list of four California, Rhode Island and North Carolina spots is
//! used, so the binary needs no setup to run.

use crate::Location;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// File looked up by [`Config::load`].
pub const CONFIG_FILE: &str = "tide-pools.toml";

/// Application configuration loaded from tide-pools.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Locations to check, in the order they are reported
    pub locations: Vec<Location>,
    /// HTTP fetch and retry policy
    pub fetch: FetchConfig,
}

/// Retry policy for page fetches.
///
/// Mirrors a classic retrying HTTP adapter: `retries` extra attempts on a
/// retryable status or a connection-level failure, sleeping
/// `backoff_factor * 2^(n-1)` seconds before retry `n` (no sleep before the
/// first retry).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Retries after the initial attempt
    pub retries: u32,
    /// Exponential backoff base in seconds
    pub backoff_factor: f64,
    /// Per-attempt request timeout in seconds
    pub timeout_secs: u64,
    /// Response statuses that trigger a retry
    pub retry_statuses: Vec<u16>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            retries: 3,
            backoff_factor: 1.0,
            timeout_secs: 30,
            retry_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            locations: vec![
                Location::new(
                    "Half Moon Bay, California",
                    "https://www.tide-forecast.com/locations/Half-Moon-Bay-California/tides/latest",
                    "https://www.timeanddate.com/sun/@5354943",
                ),
                Location::new(
                    "Huntington Beach, California",
                    "https://www.tide-forecast.com/locations/Huntington-Beach/tides/latest",
                    "https://www.timeanddate.com/sun/usa/huntington-beach",
                ),
                Location::new(
                    "Providence, Rhode Island",
                    "https://www.tide-forecast.com/locations/Providence-Rhode-Island/tides/latest",
                    "https://www.timeanddate.com/sun/usa/providence",
                ),
                Location::new(
                    "Wrightsville Beach, North Carolina",
                    "https://www.tide-forecast.com/locations/Wrightsville-Beach-North-Carolina/tides/latest",
                    "https://www.timeanddate.com/sun/@4500092",
                ),
            ],
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from tide-pools.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        locations = config.locations.len(),
                        "Loaded tide pool configuration"
                    );
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), "Invalid config file format: {}", e);
                    warn!("Using built-in tide pool locations");
                    Self::default()
                }
            },
            Err(e) => {
                debug!(path = %path.display(), "No config file ({}), using built-in locations", e);
                Self::default()
            }
        }
    }
}
