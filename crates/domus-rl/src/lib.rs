//! Domus RL - Tabular reinforcement learning for the simulated devices
//!
//! This crate couples a generic epsilon-greedy Q-learning agent to the
//! discrete-state device environments from `domus-core` and drives them with
//! an episode runner.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod agent;
pub mod env;
pub mod state;
pub mod trainer;

pub use agent::QLearningAgent;
pub use env::{Environment, MowerEnv, PolicyEnv};
pub use state::{Battery, MowerAction, MowerObs, Reward, Weather};
pub use trainer::{train_mower, EpisodeSummary, Trainer, TrainerConfig, TrainingReport};
