//! Flatten command implementation.

use crate::cli::FlattenArgs;
use crate::error::Result;
use rigging_config::flatten_object;

/// Print `{"keys": [...], "values": [...]}` for the given JSON object.
pub fn execute(args: FlattenArgs) -> Result<()> {
    let split = flatten_object(&args.record);
    println!("{}", serde_json::to_string(&split)?);
    Ok(())
}
