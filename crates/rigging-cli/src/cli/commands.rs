use clap::{Args, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::parse_record;

/// Available Rigging subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble the configuration tree for a build mode
    ///
    /// Loads build options (rigging.toml or the "rigging" field of
    /// package.json), merges the fragments active in the selected mode into
    /// the base tree, and prints the result as JSON.
    Assemble(AssembleArgs),

    /// Validate build options
    ///
    /// Checks required paths, the public path, environment keys and
    /// fragment trees, then verifies that the entry point, HTML template
    /// and source directory exist.
    Check(CheckArgs),

    /// Split a JSON object into parallel key and value sequences
    ///
    /// Example:
    ///   rigging flatten '{"a": 1, "b": 2}'
    Flatten(FlattenArgs),
}

/// Arguments for the assemble command
#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Build mode, overriding NODE_ENV
    #[arg(short, long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Path to a rigging.toml or package.json, relative to --root
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root used for discovery and relative paths
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Write the JSON tree to a file instead of stdout, relative to the current directory
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed output
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Build mode, overriding NODE_ENV
    #[arg(short, long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Path to a rigging.toml or package.json, relative to --root
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root used for discovery and path checks
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// Arguments for the flatten command
#[derive(Args, Debug)]
pub struct FlattenArgs {
    /// JSON object to flatten
    #[arg(value_name = "JSON", value_parser = parse_record)]
    pub record: Map<String, Value>,
}
