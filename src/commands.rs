//! Subcommands of the `jp` binary.
pub mod generate;
