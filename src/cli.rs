use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Plain-text track listing
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "playsmith")]
#[command(about = "Composable playlist pipeline engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in recipes
    List,

    /// Run a recipe and write the resulting playlist
    Run {
        /// Recipe slug (see `playsmith list`)
        recipe: String,

        /// Recipe parameters as name=value pairs
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
