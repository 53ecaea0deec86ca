//! Observability module
//!
//! Logging infrastructure for `nativecomp`. Everything is written to
//! stderr so generated scripts on stdout stay clean.

pub mod logging;

pub use logging::{LOG_LEVEL_ENV_VAR, LogFormat, LoggingConfig, init_logging};
