//! Command implementations for the Rigging CLI.
//!
//! - [`assemble`] - Assemble and print the configuration tree
//! - [`check`] - Validate build options
//! - [`flatten`] - Split a JSON object into keys and values
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod assemble;
pub mod check;
pub mod flatten;
pub(crate) mod utils;

pub use assemble::execute as assemble_execute;
pub use check::execute as check_execute;
pub use flatten::execute as flatten_execute;
