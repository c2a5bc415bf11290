//! Internal subcommands of the step entrypoint.
//!
//! Before the entrypoint runs a wrapped user command it offers its argument
//! vector to [`Dispatcher::process`]. When the first argument names one of
//! the internal subcommands and the argument count fits, the matching action
//! runs and its [`Outcome`] is returned; otherwise the caller receives
//! [`Outcome::NotMatched`] and carries on as normal.
//!
//! | Command         | Arguments             | Action                               |
//! |-----------------|-----------------------|--------------------------------------|
//! | `cp`            | `<source> <dest>`     | Copy a file byte for byte            |
//! | `decode-script` | `<path>`              | Decode a base64 script in place      |
//! | `step-init`     | `[step-name...]`      | Lay out step state under the root    |
//!
//! ```rust,no_run
//! use entrypoint_subcommands::{Dispatcher, Outcome};
//!
//! let dispatcher = Dispatcher::new("/tekton");
//! match dispatcher.process(&["step-init", "build", "test"]) {
//!     Outcome::NotMatched => { /* run the wrapped command */ }
//!     Outcome::Completed(done) => println!("{done}"),
//!     Outcome::Failed(error) => eprintln!("{error}"),
//! }
//! ```

mod actions;
mod dispatch;
mod error;
mod outcome;
mod subcommand;

#[cfg(test)]
mod tests;

pub use dispatch::{ArityPolicy, Dispatcher};
pub use error::{ActionError, FailureKind, SubcommandError};
pub use outcome::{Completion, Outcome};
pub use subcommand::{Arity, Subcommand};

/// Tracing target for subcommand dispatch.
pub(crate) const SUBCOMMAND_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Offers `args` to a dispatcher rooted at the default step root.
pub fn process<S: AsRef<str>>(args: &[S]) -> Outcome {
    Dispatcher::default().process(args)
}
