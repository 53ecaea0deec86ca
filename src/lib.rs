//! `nativecomp` - native shell completion scripts from command trees
//!
//! This library turns an abstract command tree into self-contained bash and
//! zsh completion scripts. Trees come from YAML/JSON definition files or
//! from a `clap::Command`; the generated scripts never call back into the
//! program they complete.

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod observability;
pub mod shell;
