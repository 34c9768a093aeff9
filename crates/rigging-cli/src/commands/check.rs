//! Check command implementation.
//!
//! Validates build options without assembling.

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use rigging_config::{Assembler, ConfigValidator, FsValidator};

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load options from rigging.toml or package.json
/// 2. Check the build mode and required paths
/// 3. Check that the entry point, HTML template and source directory exist
/// 4. Dry-run the assembly so fragment conflicts surface here
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking build options...");

    let root = utils::project_root(args.root.as_deref())?;
    let options = utils::load_options(&root, args.config.as_deref(), args.mode)?;

    FsValidator::new(&root).validate(&options)?;
    let mode = options.mode()?;
    ui::success(&format!("Options are valid for {mode}"));

    let config = Assembler::new(&options)?.assemble()?;
    ui::info(&format!("  rules: {}", config.rule_names().join(", ")));
    ui::info(&format!("  plugins: {}", config.plugin_names().join(", ")));
    if options.fragments.is_empty() {
        ui::debug("No custom fragments declared");
    }

    ui::success("All checks passed!");
    Ok(())
}
