//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// URL probed by the binary when `--url` is not given
pub const DEFAULT_PROBE_URL: &str = "http://all.api.radio-browser.info/json/stats";

/// Per-request timeout used when neither the profile nor the CLI sets one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Directory under the home directory holding the profile
pub const CONFIG_DIR: &str = ".apy";

/// Profile file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Log file written next to the working directory
pub const LOG_FILE: &str = "apy.log";

/// Application name
pub const APP_NAME: &str = "apy";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
