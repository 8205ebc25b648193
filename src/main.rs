//! Pollencast: pollen forecasts for any US ZIP code, in your terminal.

mod commands;
mod ui;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "pollencast",
    version,
    about = "Pollen forecast in your terminal",
    long_about = "Pollencast - get pollen forecasts for any US ZIP code right in your terminal."
)]
struct Cli {
    #[command(flatten)]
    opts: ForecastOpts,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Args)]
struct ForecastOpts {
    /// US ZIP code (defaults to the ZIP code in your config)
    zip: Option<String>,

    /// Number of forecast days (1-5)
    #[arg(short, long)]
    days: Option<u8>,

    /// Show today only (shortcut for --days 1)
    #[arg(short, long)]
    today: bool,

    /// One-line summary output
    #[arg(short, long)]
    compact: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Get pollen forecast for a US ZIP code
    Forecast {
        #[command(flatten)]
        opts: ForecastOpts,
    },

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommand>,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Show the current configuration
    Show,

    /// Set a config value (keys: api_key, default_zip, days)
    Set { key: String, value: String },

    /// Run the interactive first-time setup wizard
    Init,

    /// Print config file path
    Path,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        ui::render_error(&err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    pollencast_core::init()?;

    match cli.command {
        // Bare `pollencast [ZIP]` behaves like `pollencast forecast [ZIP]`.
        None => commands::forecast(cli.opts).await,
        Some(Command::Forecast { opts }) => commands::forecast(opts).await,
        Some(Command::Config { command }) => commands::config(command),
    }
}
