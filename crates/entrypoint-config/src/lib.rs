//! Process-level configuration for the step entrypoint.
//!
//! [`Config`] is layered by `ortho_config`: built-in defaults, then an
//! optional TOML file, then `ENTRYPOINT_*` environment variables. The
//! entrypoint wraps arbitrary user commands, so it never claims command-line
//! flags for itself; [`Config::load_for_program`] hands the loader the
//! program name only and leaves every other argument for the subcommand
//! dispatcher or the wrapped command.
//!
//! | Variable                 | Default   | Meaning                             |
//! |--------------------------|-----------|-------------------------------------|
//! | `ENTRYPOINT_STEP_ROOT`   | `/tekton` | Root directory used by `step-init`  |
//! | `ENTRYPOINT_LOG_FILTER`  | `info`    | `tracing` filter directive          |
//! | `ENTRYPOINT_LOG_FORMAT`  | `json`    | `json` or `compact`                 |
//! | `ENTRYPOINT_CONFIG_PATH` | unset     | TOML file holding the same keys     |

mod defaults;
mod logging;

#[cfg(test)]
mod tests;

use std::ffi::OsString;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    CONFIG_PATH_ENV, DEFAULT_LOG_FILTER, DEFAULT_STEP_ROOT, LOG_FILTER_ENV, LOG_FORMAT_ENV,
    STEP_ROOT_ENV, default_log_filter, default_log_format, default_step_root,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved entrypoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ENTRYPOINT")]
pub struct Config {
    #[serde(default = "default_step_root")]
    #[ortho_config(default = default_step_root())]
    step_root: Utf8PathBuf,
    #[serde(default = "default_log_filter")]
    #[ortho_config(default = default_log_filter())]
    log_filter: String,
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_root: default_step_root(),
            log_filter: default_log_filter(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Loads configuration for `program` from defaults, files and the
    /// environment.
    ///
    /// Only the program name reaches the loader, so no process argument is
    /// ever interpreted as a configuration flag.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`OrthoError`] when a configuration file cannot be
    /// read or a value does not deserialise (for example an unknown log
    /// format).
    pub fn load_for_program(program: impl Into<OsString>) -> Result<Self, Arc<OrthoError>> {
        Self::load_from_iter([program.into()])
    }

    /// Returns a copy of the configuration rooted at `step_root`.
    #[must_use]
    pub fn with_step_root(mut self, step_root: impl Into<Utf8PathBuf>) -> Self {
        self.step_root = step_root.into();
        self
    }

    /// Returns a copy of the configuration using `log_filter`.
    #[must_use]
    pub fn with_log_filter(mut self, log_filter: impl Into<String>) -> Self {
        self.log_filter = log_filter.into();
        self
    }

    /// Returns a copy of the configuration using `log_format`.
    #[must_use]
    pub const fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }

    /// Directory under which `step-init` writes its layout.
    #[must_use]
    pub fn step_root(&self) -> &Utf8Path {
        self.step_root.as_path()
    }

    /// Log filter expression handed to `tracing-subscriber`.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Selected log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
