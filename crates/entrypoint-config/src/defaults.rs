//! Default values and environment variable names for entrypoint configuration.
//!
//! The variable names follow from the `ENTRYPOINT` prefix given to the
//! configuration loader; they are spelled out here for tests and tooling.

use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Root directory under which `step-init` lays out step state.
pub const DEFAULT_STEP_ROOT: &str = "/tekton";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Environment variable overriding the step root directory.
pub const STEP_ROOT_ENV: &str = "ENTRYPOINT_STEP_ROOT";

/// Environment variable overriding the log filter expression.
pub const LOG_FILTER_ENV: &str = "ENTRYPOINT_LOG_FILTER";

/// Environment variable overriding the log output format.
pub const LOG_FORMAT_ENV: &str = "ENTRYPOINT_LOG_FORMAT";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "ENTRYPOINT_CONFIG_PATH";

/// Default step root as an owned path.
#[must_use]
pub fn default_step_root() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_STEP_ROOT)
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
