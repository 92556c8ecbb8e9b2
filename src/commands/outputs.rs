//! Outputs command implementation

use std::path::PathBuf;

use crate::cli::OutputsArgs;
use crate::commands::helpers::resolve_build;
use crate::error::Result;

/// Run outputs command
pub fn run(project: Option<PathBuf>, args: OutputsArgs) -> Result<()> {
    let resolved = resolve_build(project, &args.build)?;
    let outputs = resolved.config.outputs();
    print!("{}", render(&outputs, args.json)?);
    Ok(())
}

fn render(outputs: &[PathBuf], json: bool) -> Result<String> {
    if json {
        let rendered = serde_json::to_string(outputs).map_err(std::io::Error::from)?;
        return Ok(format!("{}\n", rendered));
    }

    Ok(outputs
        .iter()
        .map(|path| format!("{}\n", path.display()))
        .collect())
}
