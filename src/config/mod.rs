//! Tree definition files
//!
//! Loads and validates YAML or JSON descriptions of a command tree and
//! converts them into the [`Node`](crate::model::Node) model.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{LoadResult, LoaderOptions, TreeFormat, TreeLimits, TreeLoader};
pub use schema::*;
pub use validation::{ValidationResult, Validator};
