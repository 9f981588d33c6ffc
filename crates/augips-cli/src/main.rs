use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod run;

#[derive(Debug, Parser)]
#[command(name = "augips")]
#[command(about = "Scrape retail store locations into CSV files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a scraper by name, every scraper with `all`, or print names with `list`
    Run {
        /// Scraper name, `all`, or `list`
        target: String,
        /// Verbose logging plus saved HTML/screenshots in the debug directory
        #[arg(long)]
        debug: bool,
    },
    /// Scrape without writing a CSV and print what was found
    Inspect {
        /// Scraper name
        name: String,
        #[arg(long)]
        debug: bool,
    },
}

impl Commands {
    fn debug(&self) -> bool {
        match self {
            Self::Run { debug, .. } | Self::Inspect { debug, .. } => *debug,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = augips_core::load_app_config()?;
    init_tracing(&config.log_level, cli.command.debug())?;

    match cli.command {
        Commands::Run { target, debug } => run::run(&config, &target, debug).await,
        Commands::Inspect { name, debug } => run::inspect(&config, &name, debug).await,
    }
}

/// `--debug` forces the `debug` level; otherwise `RUST_LOG` wins over the
/// configured level.
fn init_tracing(log_level: &str, debug: bool) -> anyhow::Result<()> {
    let env_filter = if debug {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

#[cfg(test)]
mod tests;
