//! Binary entrypoint for the step entrypoint subcommands.
//!
//! Delegates to [`entrypoint_cli::run`] with the real process arguments and
//! standard error. Configuration comes from `ENTRYPOINT_*` variables and an
//! optional configuration file, never from the arguments.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stderr = io::stderr().lock();
    entrypoint_cli::run(std::env::args_os(), &mut stderr)
}
