//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod generate;
pub mod generate_config;
pub mod list;
pub mod masks;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate distractor sentences for stimulus files
    Generate(generate::GenerateArgs),

    /// Write every masked query for external scoring
    Masks(masks::MasksArgs),

    /// Check stimulus files without generating
    Validate(validate::ValidateArgs),

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List threshold policies
    Thresholds,

    /// List output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Generate(args) => args.execute(),
            Commands::Masks(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => list::execute(*subcommand),
        }
    }
}

/// Initialize logging based on verbosity level
///
/// `-q` silences logging entirely; otherwise `RUST_LOG` wins over `-v`.
pub fn init_logging(quiet: bool, verbose: u8) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // a second initialization in the same process is ignored
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
