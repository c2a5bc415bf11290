//! Leaf actions performed by matched subcommands.
//!
//! Each action is independent of the others and runs to completion on the
//! caller's thread.

mod copy;
mod decode;
mod step_init;

pub(crate) use copy::copy;
pub(crate) use decode::decode_script;
pub(crate) use step_init::step_init;

#[cfg(test)]
pub(crate) use step_init::{link_target, status_directory};
