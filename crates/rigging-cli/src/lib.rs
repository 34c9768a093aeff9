//! Rigging CLI - mode-aware bundler configuration from the command line.
//!
//! This crate wraps [`rigging_config`] in a small command-line interface:
//! it discovers build options, assembles the configuration tree for a build
//! mode, and prints it as JSON for the bundling tool to consume.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - `assemble`, `check` and `flatten`
//! - [`error`] - CLI error type and context helpers
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Colored status lines on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use rigging_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
