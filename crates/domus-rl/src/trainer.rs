//! Episode runner and training diagnostics

use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use domus_core::{DomusError, Result};

use crate::agent::QLearningAgent;
use crate::env::{Environment, MowerEnv};
use crate::state::{MowerAction, MowerObs, Reward};

/// Training run configuration. All fields have defaults, so a partial TOML
/// file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of episodes to run
    #[serde(default = "default_episodes")]
    pub episodes: usize,

    /// Step cap per episode; episodes never end earlier
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Seed for the environment and agent RNGs
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_episodes() -> usize {
    2000
}
fn default_max_steps() -> usize {
    24
}
fn default_seed() -> u64 {
    42
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            episodes: default_episodes(),
            max_steps: default_max_steps(),
            seed: default_seed(),
        }
    }
}

impl TrainerConfig {
    /// Loads the configuration from a TOML file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DomusError::Config(e.to_string()))
    }
}

/// Scalar summary of one completed episode. Read-only once recorded.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub total_reward: Reward,
    pub errors: u32,
    pub successes: u32,
    pub epsilon: f64,
}

/// History of a whole training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub run_id: Uuid,
    pub episodes: Vec<EpisodeSummary>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl TrainingReport {
    /// Mean total reward over the last `n` episodes (or fewer if the run
    /// was shorter).
    pub fn mean_reward(&self, last_n: usize) -> f64 {
        let tail = &self.episodes[self.episodes.len().saturating_sub(last_n)..];
        if tail.is_empty() {
            return 0.0;
        }
        tail.iter().map(|e| e.total_reward).sum::<f64>() / tail.len() as f64
    }

    pub fn final_epsilon(&self) -> f64 {
        self.episodes.last().map_or(0.0, |e| e.epsilon)
    }
}

/// Drives repeated agent-environment interaction for a configured number of
/// episodes.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Runs the full training loop and returns the episode history.
    pub fn run<E>(
        &self,
        env: &mut E,
        agent: &mut QLearningAgent<E::State, E::Action>,
    ) -> TrainingReport
    where
        E: Environment,
        E::State: Clone + Eq + Hash,
        E::Action: Clone + Eq + Hash,
    {
        let started_at = Utc::now();
        let mut episodes = Vec::with_capacity(self.config.episodes);

        for episode in 0..self.config.episodes {
            let mut state = env.reset();
            let mut total_reward = 0.0;
            let mut errors = 0;
            let mut successes = 0;

            for _ in 0..self.config.max_steps {
                let action = agent.choose_action(&state);
                let (next_state, reward) = env.step(&action);
                agent.update(state.clone(), action, reward, &next_state);

                total_reward += reward;
                if reward > 0.0 {
                    successes += 1;
                }
                if E::is_fault(&next_state) {
                    errors += 1;
                }
                state = next_state;
            }

            agent.decay_exploration(total_reward);
            debug!(episode, total_reward, errors, successes, "episode complete");

            episodes.push(EpisodeSummary {
                episode,
                total_reward,
                errors,
                successes,
                epsilon: agent.epsilon(),
            });
        }

        let report = TrainingReport {
            run_id: Uuid::new_v4(),
            episodes,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            run_id = %report.run_id,
            episodes = report.episodes.len(),
            mean_reward = report.mean_reward(100),
            epsilon = report.final_epsilon(),
            table_size = agent.table_len(),
            "training run complete"
        );
        report
    }
}

/// Convenience entry point: trains a fresh agent on the full mower
/// simulation and returns both the history and the trained agent.
pub fn train_mower(config: &TrainerConfig) -> (TrainingReport, QLearningAgent<MowerObs, MowerAction>) {
    let mut env = MowerEnv::new(config.seed);
    let mut agent = QLearningAgent::new(MowerAction::ALL.to_vec(), config.seed.wrapping_add(1));
    let report = Trainer::new(config.clone()).run(&mut env, &mut agent);
    (report, agent)
}
