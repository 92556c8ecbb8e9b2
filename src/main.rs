//! bdist-venv command line entry point

use clap::Parser;

use bdist_venv::cli::{Cli, Commands};
use bdist_venv::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(cli.project, args),
        Commands::Outputs(args) => commands::outputs::run(cli.project, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
