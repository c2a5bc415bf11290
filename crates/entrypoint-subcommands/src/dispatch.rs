//! Matching of argument vectors onto subcommands.
//!
//! Dispatch is a two step pipeline: the first argument is looked up by exact
//! name, then the remaining argument count is checked against the
//! subcommand's [`Arity`]. A mismatch at either step yields
//! [`Outcome::NotMatched`]; only a matched action can yield
//! [`Outcome::Failed`].

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use entrypoint_config::{Config, default_step_root};

use crate::SUBCOMMAND_TARGET;
use crate::actions;
use crate::error::SubcommandError;
use crate::outcome::Outcome;
use crate::subcommand::{Arity, Subcommand};

/// How a known command name with the wrong argument count is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityPolicy {
    /// Report [`Outcome::NotMatched`] so the wrapped command still runs.
    ///
    /// The entrypoint must never block a user's command because its
    /// arguments happen to start with a subcommand name.
    FailOpen,
}

/// Stateless dispatcher holding the step root used by `step-init`.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    step_root: Utf8PathBuf,
    arity_policy: ArityPolicy,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(default_step_root())
    }
}

impl Dispatcher {
    /// Creates a dispatcher whose `step-init` writes under `step_root`.
    #[must_use]
    pub fn new(step_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            step_root: step_root.into(),
            arity_policy: ArityPolicy::FailOpen,
        }
    }

    /// Creates a dispatcher from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.step_root())
    }

    /// Directory under which `step-init` writes its layout.
    #[must_use]
    pub fn step_root(&self) -> &Utf8Path {
        self.step_root.as_path()
    }

    /// Policy applied to arity mismatches.
    #[must_use]
    pub const fn arity_policy(&self) -> ArityPolicy {
        self.arity_policy
    }

    /// Offers `args` (command name first) to the known subcommands.
    ///
    /// Returns [`Outcome::NotMatched`] without touching the filesystem when
    /// `args` is empty, names no subcommand, or carries the wrong number of
    /// trailing arguments. Otherwise the action's outcome is returned as is.
    pub fn process<S: AsRef<str>>(&self, args: &[S]) -> Outcome {
        let Some((name, rest)) = args.split_first() else {
            debug!(target: SUBCOMMAND_TARGET, "no arguments to dispatch");
            return Outcome::NotMatched;
        };
        let name = name.as_ref();

        let Some(subcommand) = Subcommand::lookup(name) else {
            debug!(target: SUBCOMMAND_TARGET, command = name, "not an internal subcommand");
            return Outcome::NotMatched;
        };

        let arity = subcommand.arity();
        if !arity.accepts(rest.len()) {
            return self.arity_mismatch(subcommand, arity, rest.len());
        }

        debug!(
            target: SUBCOMMAND_TARGET,
            subcommand = subcommand.name(),
            arguments = rest.len(),
            "dispatching subcommand"
        );
        let result = match (subcommand, rest) {
            (Subcommand::Copy, [source, destination]) => actions::copy(
                Utf8Path::new(source.as_ref()),
                Utf8Path::new(destination.as_ref()),
            ),
            (Subcommand::DecodeScript, [path]) => {
                actions::decode_script(Utf8Path::new(path.as_ref()))
            }
            (Subcommand::StepInit, steps) => actions::step_init(&self.step_root, steps),
            // Not reachable once `Arity::accepts` has passed.
            _ => return self.arity_mismatch(subcommand, arity, rest.len()),
        };

        match result {
            Ok(completion) => Outcome::Completed(completion),
            Err(source) => Outcome::Failed(SubcommandError::new(subcommand, source)),
        }
    }

    fn arity_mismatch(&self, subcommand: Subcommand, arity: Arity, received: usize) -> Outcome {
        match self.arity_policy {
            ArityPolicy::FailOpen => {
                debug!(
                    target: SUBCOMMAND_TARGET,
                    subcommand = subcommand.name(),
                    expected = ?arity,
                    received,
                    "argument count mismatch; treating as not matched"
                );
                Outcome::NotMatched
            }
        }
    }
}
