//! Failure types produced by subcommand actions.
//!
//! Actions return [`ActionError`]; the dispatcher wraps it in a
//! [`SubcommandError`] naming the subcommand that failed. Nothing here ever
//! escapes the dispatch boundary as a `Result::Err`: callers receive the
//! error inside [`crate::Outcome::Failed`].

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::subcommand::Subcommand;

/// Coarse failure classification reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A filesystem read, write or create failed.
    Io,
    /// The script payload was not valid base64.
    Decoding,
    /// `step-init` could not establish its layout.
    Init,
}

/// Errors raised while performing a single action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A filesystem operation failed.
    #[error("failed to {operation} '{path}': {source}")]
    Io {
        /// Short description of the attempted operation.
        operation: &'static str,
        /// Path the operation targeted.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The file contents were not a valid base64 payload.
    #[error("failed to decode base64 payload in '{path}': {source}")]
    Decode {
        /// File holding the payload.
        path: Utf8PathBuf,
        /// Underlying decoder error.
        #[source]
        source: base64::DecodeError,
    },

    /// `cp` was asked to copy a file onto itself.
    #[error("cannot copy '{path}' onto itself")]
    SameFile {
        /// Destination that resolves to the source.
        path: Utf8PathBuf,
    },

    /// A step name cannot be used as a directory entry.
    #[error("invalid step name {name:?}: {reason}")]
    InvalidStepName {
        /// Rejected step name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// A step link path is held by something other than a symlink.
    #[error("cannot create step link '{path}': path exists and is not a symlink")]
    LinkOccupied {
        /// Path that could not be replaced.
        path: Utf8PathBuf,
    },
}

impl ActionError {
    /// Creates a new `Io` error.
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Creates a new `Decode` error.
    #[must_use]
    pub fn decode(path: impl Into<Utf8PathBuf>, source: base64::DecodeError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Creates a new `InvalidStepName` error.
    #[must_use]
    pub fn invalid_step_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidStepName {
            name: name.into(),
            reason,
        }
    }
}

/// A matched subcommand that failed to complete its action.
#[derive(Debug, Error)]
#[error("error running subcommand \"{subcommand}\": {source}")]
pub struct SubcommandError {
    subcommand: Subcommand,
    #[source]
    source: ActionError,
}

impl SubcommandError {
    /// Wraps an action failure with the subcommand that produced it.
    #[must_use]
    pub const fn new(subcommand: Subcommand, source: ActionError) -> Self {
        Self { subcommand, source }
    }

    /// Subcommand whose action failed.
    #[must_use]
    pub const fn subcommand(&self) -> Subcommand {
        self.subcommand
    }

    /// Underlying action failure.
    #[must_use]
    pub const fn action_error(&self) -> &ActionError {
        &self.source
    }

    /// Classifies the failure.
    ///
    /// Filesystem errors raised while initialising step state count as
    /// [`FailureKind::Init`].
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match (&self.source, self.subcommand) {
            (ActionError::Decode { .. }, _) => FailureKind::Decoding,
            (ActionError::InvalidStepName { .. } | ActionError::LinkOccupied { .. }, _)
            | (ActionError::Io { .. }, Subcommand::StepInit) => FailureKind::Init,
            (ActionError::Io { .. } | ActionError::SameFile { .. }, _) => FailureKind::Io,
        }
    }
}
