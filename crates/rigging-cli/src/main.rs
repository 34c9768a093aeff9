//! Rigging CLI - assemble bundler configuration for a build mode.
//!
//! Parses arguments, initializes logging, and dispatches to the command
//! implementations.

use clap::Parser;
use miette::Result;
use rigging_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Assemble(assemble_args) => commands::assemble_execute(assemble_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Flatten(flatten_args) => commands::flatten_execute(flatten_args),
    };

    result.map_err(error::cli_error_to_miette)
}
