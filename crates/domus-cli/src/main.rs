//! Domus CLI - drive the simulated devices from the command line
//!
//! `train` runs the mower Q-learning loop, `demo` replays the device control
//! sequences, `scenario` feeds free-text instructions to the lock agent.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unused_async)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{demo, scenario, train};

#[derive(Parser)]
#[command(name = "domus")]
#[command(author, version, about = "Domus - simulated smart-home devices and RL demos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the mower agent and print the episode history
    Train(train::TrainArgs),

    /// Replay a device control sequence
    #[command(subcommand)]
    Demo(demo::DemoCommands),

    /// Run lock scenarios through the decision agent
    Scenario(scenario::ScenarioArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("domus={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Train(args) => train::run(args).await,
        Commands::Demo(cmd) => demo::run(cmd).await,
        Commands::Scenario(args) => scenario::run(args).await,
    }
}
