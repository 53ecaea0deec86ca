//! Command-line interface for the `nativecomp` binary.

pub mod args;
pub mod commands;
