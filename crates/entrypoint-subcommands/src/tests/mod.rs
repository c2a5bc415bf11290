//! Unit and behavioural tests for subcommand dispatch.

mod support;
