use anyhow::Result;
use clap::Parser;
use playsmith::cli::{Cli, Commands};
use playsmith::commands::{self, RunConfig};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List => {
            commands::list_recipes();
            Ok(())
        }
        Commands::Run {
            recipe,
            params,
            format,
            output,
        } => commands::run_recipe(RunConfig {
            recipe,
            params,
            format,
            output,
        }),
    }
}
