//! Configuration loading for the entrypoint binary.

use std::ffi::OsStr;

use entrypoint_config::Config;

use crate::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration for the program named `program`.
    ///
    /// Implementations never see the remaining process arguments; those
    /// belong to the dispatcher or the wrapped command.
    fn load(&self, program: &OsStr) -> Result<Config, AppError>;
}

/// Loader backed by `ortho_config` defaults, files and environment.
pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, program: &OsStr) -> Result<Config, AppError> {
        Config::load_for_program(program).map_err(AppError::LoadConfiguration)
    }
}
