//! The closed set of internal subcommands and their argument arity.

use std::fmt;

/// Internal subcommands recognised ahead of the wrapped user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    /// `cp <source> <destination>`
    Copy,
    /// `decode-script <path>`
    DecodeScript,
    /// `step-init [step-name...]`
    StepInit,
}

impl Subcommand {
    /// Every subcommand in match priority order.
    pub const ALL: [Self; 3] = [Self::Copy, Self::DecodeScript, Self::StepInit];

    /// Looks up a subcommand by its exact, case-sensitive name.
    ///
    /// Prefixes and abbreviations never match.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|subcommand| subcommand.name() == name)
    }

    /// Returns the command name as typed on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Copy => "cp",
            Self::DecodeScript => "decode-script",
            Self::StepInit => "step-init",
        }
    }

    /// Number of trailing arguments the subcommand requires.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Copy => Arity::Exact(2),
            Self::DecodeScript => Arity::Exact(1),
            Self::StepInit => Arity::Any,
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Required count of arguments following the command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any number of arguments, including none.
    Any,
}

impl Arity {
    /// Returns whether `count` trailing arguments satisfy this arity.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(expected) => expected == count,
            Self::Any => true,
        }
    }
}
