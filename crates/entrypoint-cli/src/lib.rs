//! Command-line front end for the step entrypoint subcommands.
//!
//! [`run`] loads configuration, builds this run's telemetry and offers the
//! arguments (minus the program name) to the subcommand dispatcher exactly
//! once. The resulting outcome is mapped to an exit code:
//!
//! | Outcome              | Exit code | Stderr            |
//! |----------------------|-----------|-------------------|
//! | not matched          | 0         | nothing           |
//! | completed            | 0         | nothing           |
//! | subcommand failed    | 1         | the failure       |
//! | bad configuration    | 2         | the config error  |
//!
//! A not-matched outcome means the surrounding orchestrator should run the
//! wrapped command; it is never reported as an error.

mod config;
pub mod telemetry;


use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;
use tracing::{Dispatch, debug, error, info};

use entrypoint_config::Config;
use entrypoint_subcommands::{Dispatcher, Outcome};

use crate::config::{ConfigLoader, OrthoConfigLoader};
use crate::telemetry::TelemetryError;

/// Tracing target for CLI events.
const CLI_TARGET: &str = env!("CARGO_PKG_NAME");

/// Program name handed to the configuration loader when argv is empty.
const PROGRAM_NAME: &str = "entrypoint";

/// Exit status used when a matched subcommand fails.
pub const SUBCOMMAND_FAILURE_STATUS: u8 = 1;

/// Exit status used when configuration or telemetry cannot be set up.
pub const SETUP_FAILURE_STATUS: u8 = 2;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<OrthoError>),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
}

/// Runs the entrypoint using the provided arguments and standard error
/// handle.
///
/// The first argument is the program name and is only used to load
/// configuration. Arguments that are not valid UTF-8 cannot name a
/// subcommand or its operands, so they are reported as not matched.
#[must_use]
pub fn run<I, A, E>(args: I, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
    E: Write,
{
    run_with_loader(args, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, A, E, L>(args: I, stderr: &mut E, loader: &L) -> ExitCode
where
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
    E: Write,
    L: ConfigLoader,
{
    let mut args = args.into_iter().map(Into::into);
    let program = args.next().unwrap_or_else(|| OsString::from(PROGRAM_NAME));
    let arguments: Result<Vec<String>, OsString> = args.map(OsString::into_string).collect();

    let (config, telemetry) = match setup(loader, &program) {
        Ok(setup) => setup,
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            return ExitCode::from(SETUP_FAILURE_STATUS);
        }
    };

    tracing::dispatcher::with_default(&telemetry, || {
        let outcome = match arguments {
            Ok(arguments) => Dispatcher::from_config(&config).process(&arguments),
            Err(argument) => {
                debug!(target: CLI_TARGET, ?argument, "argument is not valid UTF-8");
                Outcome::NotMatched
            }
        };
        report(outcome, stderr)
    })
}

fn setup<L: ConfigLoader>(loader: &L, program: &OsStr) -> Result<(Config, Dispatch), AppError> {
    let config = loader.load(program)?;
    let telemetry = telemetry::dispatch(&config)?;
    Ok((config, telemetry))
}

fn report<E: Write>(outcome: Outcome, stderr: &mut E) -> ExitCode {
    match outcome {
        Outcome::NotMatched => {
            debug!(target: CLI_TARGET, "no internal subcommand matched");
            ExitCode::SUCCESS
        }
        Outcome::Completed(completion) => {
            info!(
                target: CLI_TARGET,
                subcommand = completion.subcommand().name(),
                "{completion}"
            );
            ExitCode::SUCCESS
        }
        Outcome::Failed(failure) => {
            error!(
                target: CLI_TARGET,
                subcommand = failure.subcommand().name(),
                kind = ?failure.kind(),
                "{failure}"
            );
            let _ = writeln!(stderr, "{failure}");
            ExitCode::from(SUBCOMMAND_FAILURE_STATUS)
        }
    }
}
