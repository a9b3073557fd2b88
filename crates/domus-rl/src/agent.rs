//! Tabular Q-learning agent with epsilon-greedy exploration

use std::collections::HashMap;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::Reward;

/// Multiplicative epsilon decay applied after positive-reward episodes.
pub const EPSILON_DECAY: f64 = 0.99;

/// Exploration never drops below this floor.
pub const EPSILON_FLOOR: f64 = 0.05;

const DEFAULT_ALPHA: f64 = 0.5;
const DEFAULT_GAMMA: f64 = 0.9;
const DEFAULT_EPSILON: f64 = 0.2;

/// Tabular Q-learning agent.
///
/// The value table is owned by the agent, so independent agents can train
/// side by side. Missing entries read as 0.0. Greedy selection scans the
/// action list in its fixed order and keeps the first maximum, so ties
/// resolve deterministically.
pub struct QLearningAgent<S, A> {
    table: HashMap<(S, A), f64>,
    actions: Vec<A>,
    alpha: f64,
    gamma: f64,
    epsilon: f64,
    rng: StdRng,
}

impl<S, A> QLearningAgent<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Agent with the standard hyperparameters (alpha 0.5, gamma 0.9,
    /// epsilon 0.2) and a seeded RNG for reproducible runs.
    pub fn new(actions: Vec<A>, seed: u64) -> Self {
        Self::with_params(actions, DEFAULT_ALPHA, DEFAULT_GAMMA, DEFAULT_EPSILON, seed)
    }

    pub fn with_params(actions: Vec<A>, alpha: f64, gamma: f64, epsilon: f64, seed: u64) -> Self {
        assert!(!actions.is_empty(), "action set must not be empty");
        Self {
            table: HashMap::new(),
            actions,
            alpha,
            gamma,
            epsilon,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of (state, action) pairs encountered so far.
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Stored estimate for a pair; 0.0 when unseen.
    pub fn q_value(&self, state: &S, action: &A) -> f64 {
        self.table
            .get(&(state.clone(), action.clone()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Epsilon-greedy selection: explore uniformly with probability epsilon,
    /// exploit the greedy action otherwise.
    pub fn choose_action(&mut self, state: &S) -> A {
        if self.rng.gen::<f64>() < self.epsilon {
            let idx = self.rng.gen_range(0..self.actions.len());
            return self.actions[idx].clone();
        }
        self.greedy_action(state)
    }

    /// Deterministic argmax over the action list; first-seen maximum wins.
    pub fn greedy_action(&self, state: &S) -> A {
        let mut best = &self.actions[0];
        let mut best_q = self.q_value(state, best);
        for action in &self.actions[1..] {
            let q = self.q_value(state, action);
            if q > best_q {
                best = action;
                best_q = q;
            }
        }
        best.clone()
    }

    /// One-step Q-learning update:
    /// `Q(s,a) += alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))`.
    pub fn update(&mut self, state: S, action: A, reward: Reward, next_state: &S) {
        let next_max = self
            .actions
            .iter()
            .map(|a| self.q_value(next_state, a))
            .fold(f64::NEG_INFINITY, f64::max);
        let entry = self.table.entry((state, action)).or_insert(0.0);
        *entry += self.alpha * (reward + self.gamma * next_max - *entry);
    }

    /// Decays epsilon after a positive-reward episode, never below the
    /// floor. Poor episodes leave exploration unchanged; it never grows.
    pub fn decay_exploration(&mut self, episode_reward: Reward) {
        if episode_reward > 0.0 {
            self.epsilon = (self.epsilon * EPSILON_DECAY).max(EPSILON_FLOOR);
        }
    }

    /// Hyperparameter snapshot for diagnostics.
    pub fn params(&self) -> serde_json::Value {
        serde_json::json!({
            "alpha": self.alpha,
            "gamma": self.gamma,
            "epsilon": self.epsilon,
            "q_table_size": self.table.len(),
        })
    }
}
