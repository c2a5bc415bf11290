//! The tagged result of a dispatch attempt.

use std::fmt;

use crate::error::SubcommandError;
use crate::subcommand::Subcommand;

/// Result of offering an argument vector to the dispatcher.
///
/// Exactly one variant is produced per call. [`Outcome::NotMatched`] is not
/// an error: it tells the caller to carry on with normal entrypoint
/// execution.
#[derive(Debug)]
#[must_use]
pub enum Outcome {
    /// The arguments do not name a well-formed subcommand invocation.
    NotMatched,
    /// The subcommand matched and its action succeeded.
    Completed(Completion),
    /// The subcommand matched but its action failed.
    Failed(SubcommandError),
}

impl Outcome {
    /// Returns `true` for [`Outcome::NotMatched`].
    #[must_use]
    pub const fn is_not_matched(&self) -> bool {
        matches!(self, Self::NotMatched)
    }

    /// Returns `true` for [`Outcome::Completed`].
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Returns `true` for [`Outcome::Failed`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Summary of a successfully completed subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    subcommand: Subcommand,
    message: String,
}

impl Completion {
    pub(crate) fn new(subcommand: Subcommand, message: impl Into<String>) -> Self {
        Self {
            subcommand,
            message: message.into(),
        }
    }

    /// Subcommand that ran.
    #[must_use]
    pub const fn subcommand(&self) -> Subcommand {
        self.subcommand
    }

    /// Human-readable summary of what the subcommand did.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
