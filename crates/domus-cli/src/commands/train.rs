//! Training subcommand

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use domus_rl::{train_mower, TrainerConfig};

#[derive(Args)]
pub struct TrainArgs {
    /// Number of episodes
    #[arg(short, long)]
    episodes: Option<usize>,

    /// Step cap per episode
    #[arg(short, long)]
    max_steps: Option<usize>,

    /// RNG seed for the environment and agent
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with trainer configuration; flags win over file values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full training report as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: TrainArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => TrainerConfig::load(path)?,
        None => TrainerConfig::default(),
    };
    if let Some(episodes) = args.episodes {
        config.episodes = episodes;
    }
    if let Some(max_steps) = args.max_steps {
        config.max_steps = max_steps;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    info!(
        episodes = config.episodes,
        max_steps = config.max_steps,
        seed = config.seed,
        "starting training run"
    );
    let (report, agent) = train_mower(&config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Training run {} - {} episodes, {} steps each, seed {}",
        report.run_id, config.episodes, config.max_steps, config.seed
    );
    for summary in report.episodes.iter().filter(|e| (e.episode + 1) % 100 == 0) {
        println!(
            "episode {:>5}  reward {:>7.1}  errors {:>2}  successes {:>2}  epsilon {:.3}",
            summary.episode + 1,
            summary.total_reward,
            summary.errors,
            summary.successes,
            summary.epsilon
        );
    }
    println!();
    println!("mean reward (last 100): {:.2}", report.mean_reward(100));
    println!("final epsilon:          {:.3}", report.final_epsilon());
    println!("q-table entries:        {}", agent.table_len());

    Ok(())
}
