use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::query;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so query output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dotree=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut map = commands::build_map(&cli.assignments)?;
    tracing::debug!(assignments = cli.assignments.len(), leaves = map.len(), "Built map");

    match &cli.command {
        Commands::Get(args) => query::get(&map, args, cli.format),
        Commands::Contains(args) => query::contains(&map, args, cli.format),
        Commands::Keys => query::keys(&map, cli.format),
        Commands::Items => query::items(&map, cli.format),
        Commands::Pop(args) => query::pop(&mut map, args, cli.format),
        Commands::Delete(args) => query::delete(&mut map, args, cli.format),
    }
}
