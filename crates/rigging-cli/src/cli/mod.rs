//! Command-line interface definition for Rigging.
//!
//! # Command Structure
//!
//! - `rigging assemble` - Assemble the configuration tree and print it as JSON
//! - `rigging check` - Validate build options against the filesystem
//! - `rigging flatten` - Split a JSON object into parallel keys and values

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{AssembleArgs, CheckArgs, Command, FlattenArgs};
pub use enums::*;
pub use validation::parse_record;

/// Rigging - mode-aware bundler configuration
#[derive(Parser, Debug)]
#[command(
    name = "rigging",
    version,
    about = "Assemble mode-aware bundler configuration",
    long_about = "Rigging assembles a webpack-style configuration tree from build options.\n\
                  Fragments are merged into a base tree depending on the build mode, and\n\
                  the result is printed as JSON for the bundling tool to consume."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
