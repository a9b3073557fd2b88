//! Lock-controlling agent with decision memory

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use domus_core::{Lock, OpReport, Result};

use crate::command::LockCommand;
use crate::oracle::DecisionOracle;

/// How many past decisions the oracle gets to see.
pub const HISTORY_WINDOW: usize = 5;

/// One handled scenario and the command that was executed for it.
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    pub scenario: String,
    pub command: LockCommand,
}

/// Autonomous agent driving one shared [`Lock`] from free-text scenarios.
///
/// The lock state label short-circuits the oracle when jammed: a jammed lock
/// always gets `ClearJam` without any external call.
pub struct LockAgent {
    lock: Arc<Lock>,
    oracle: Box<dyn DecisionOracle>,
    history: Vec<Decision>,
}

impl LockAgent {
    pub fn new(lock: Arc<Lock>, oracle: Box<dyn DecisionOracle>) -> Self {
        Self {
            lock,
            oracle,
            history: Vec::new(),
        }
    }

    pub fn lock(&self) -> &Lock {
        &self.lock
    }

    /// Current discrete state label as presented to the oracle.
    pub fn state_label(&self) -> &'static str {
        self.lock.status().label()
    }

    /// Full decision history, oldest first.
    pub fn history(&self) -> &[Decision] {
        &self.history
    }

    /// The bounded window the oracle is shown.
    pub fn recent_history(&self) -> &[Decision] {
        let start = self.history.len().saturating_sub(HISTORY_WINDOW);
        &self.history[start..]
    }

    /// Picks the command for a scenario. Invalid oracle responses coerce to
    /// the neutral no-action command rather than propagating.
    pub async fn decide(&self, scenario: &str) -> Result<LockCommand> {
        let label = self.state_label();
        if label == "Jammed" {
            return Ok(LockCommand::ClearJam);
        }
        let raw = self
            .oracle
            .decide(scenario, label, self.recent_history())
            .await?;
        Ok(raw.trim().parse().unwrap_or(LockCommand::NoAction))
    }

    /// Applies a command to the lock. `NoAction` touches nothing.
    pub async fn execute(&self, command: LockCommand) -> Option<OpReport> {
        match command {
            LockCommand::Lock => Some(self.lock.lock_async(Some("AI")).await),
            LockCommand::Unlock => Some(self.lock.unlock_async(Some("AI")).await),
            LockCommand::ClearJam => Some(self.lock.clear_jam()),
            LockCommand::NoAction => None,
        }
    }

    /// Decide, execute and record one scenario; returns the executed
    /// command.
    pub async fn handle_scenario(&mut self, scenario: &str) -> Result<LockCommand> {
        let command = self.decide(scenario).await?;
        let report = self.execute(command).await;
        info!(
            scenario,
            command = %command,
            outcome = ?report.as_ref().map(|r| r.outcome),
            state = self.state_label(),
            "scenario handled"
        );
        self.history.push(Decision {
            scenario: scenario.to_string(),
            command,
        });
        Ok(command)
    }
}
