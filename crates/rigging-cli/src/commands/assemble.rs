//! Assemble command implementation.
//!
//! Loads build options, assembles the configuration tree for the selected
//! mode, and prints it as JSON (or writes it to `--out`).

use crate::cli::AssembleArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use rigging_config::{Assembler, ConfigValidator, SchemaValidator};

/// Execute the assemble command.
///
/// # Steps
///
/// 1. Resolve the project root and load options (`--config`, `--mode`)
/// 2. Validate the options schema
/// 3. Merge the active fragments into the base tree
/// 4. Print the JSON tree to stdout, or write it to `--out`
///
/// # Errors
///
/// Returns configuration errors (unknown mode, missing paths, invalid
/// fragments) and I/O errors from writing the output file.
pub fn execute(args: AssembleArgs) -> Result<()> {
    let root = utils::project_root(args.root.as_deref())?;
    let options = utils::load_options(&root, args.config.as_deref(), args.mode)?;
    SchemaValidator.validate(&options)?;

    let config = Assembler::new(&options)?.assemble()?;
    let json = if args.compact {
        config.to_json()?
    } else {
        config.to_json_pretty()?
    };

    match args.out {
        Some(out) => {
            let out = utils::resolve_path(&out, &utils::get_cwd()?);
            utils::write_output(&out, &json)?;
            ui::success(&format!(
                "Wrote {} configuration to {}",
                config.mode(),
                out.display()
            ));
        }
        None => println!("{json}"),
    }

    Ok(())
}
