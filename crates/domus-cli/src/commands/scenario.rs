//! Lock scenario subcommand

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use domus_agent::{
    CompletionOracle, DecisionOracle, LockAgent, OracleConfig, ScriptedOracle,
};
use domus_core::Lock;

#[derive(Args)]
pub struct ScenarioArgs {
    /// Chat-completions endpoint; without it a scripted offline oracle is
    /// used
    #[arg(long)]
    endpoint: Option<String>,

    /// Model name for the completion endpoint
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,

    /// API key for the completion endpoint
    #[arg(long, env = "DOMUS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Instructions to handle; empty runs the built-in demo sequence
    instructions: Vec<String>,
}

/// The built-in demo: scenarios plus a manual jam injected before the
/// fourth, so the short-circuit path shows up.
const DEMO_SCENARIOS: [&str; 6] = [
    "I am leaving for work, lock the door.",
    "Guests are coming over, unlock the front door.",
    "Leaving for a jog.",
    "Something seems wrong with the lock, check it.",
    "Going to bed now.",
    "I just returned home, unlock the front door.",
];

/// Canned responses for the offline oracle; the jammed scenario never
/// reaches it.
const DEMO_RESPONSES: [&str; 5] = ["Lock", "Unlock", "None", "Lock", "Unlock"];

pub async fn run(args: ScenarioArgs) -> Result<()> {
    let oracle: Box<dyn DecisionOracle> = match &args.endpoint {
        Some(endpoint) => Box::new(CompletionOracle::new(OracleConfig {
            base_url: endpoint.clone(),
            model: args.model.clone(),
            api_key: args.api_key.clone(),
        })),
        None => Box::new(ScriptedOracle::new(DEMO_RESPONSES)),
    };

    let lock = Arc::new(Lock::new("Front Door"));
    let mut agent = LockAgent::new(Arc::clone(&lock), oracle);

    if args.instructions.is_empty() {
        for (i, scenario) in DEMO_SCENARIOS.iter().enumerate() {
            // Fault injection between the third and fourth scenario.
            if i == 3 {
                println!("{}", lock.jam());
            }
            handle(&mut agent, scenario).await?;
        }
    } else {
        for scenario in &args.instructions {
            handle(&mut agent, scenario).await?;
        }
    }

    Ok(())
}

async fn handle(agent: &mut LockAgent, scenario: &str) -> Result<()> {
    let command = agent.handle_scenario(scenario).await?;
    println!(
        "scenario: {scenario:?} -> {command} (lock state: {})",
        agent.state_label()
    );
    Ok(())
}
