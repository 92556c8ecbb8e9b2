use clap::Parser;

use super::BuildArgs;

/// Arguments for the outputs command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Show where the archive will be written:\n    bdist-venv outputs\n\n\
                   Show the archive path without platform name, as JSON:\n    bdist-venv outputs --no-plat-name --json")]
pub struct OutputsArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Print the output paths as a JSON array
    #[arg(long)]
    pub json: bool,
}
