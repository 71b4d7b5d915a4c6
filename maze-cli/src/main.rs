//! `maze` command-line entry point

use clap::Parser;
use maze_cli::commands::Commands;
use maze_cli::CliResult;

/// Generate distractor sentences for the maze task
#[derive(Debug, Parser)]
#[command(name = "maze", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
