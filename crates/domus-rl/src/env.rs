//! Reward-emitting environments over the device state machines

use std::collections::HashMap;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use domus_core::{Mower, MowerActivity};

use crate::state::{Battery, MowerAction, MowerObs, Reward, Weather};

/// A discrete-state environment: reset to a fresh episode, then step with
/// actions and collect rewards. Invalid actions never error; they simply pay
/// a negative reward.
pub trait Environment {
    type State;
    type Action;

    /// Start a new episode and return the initial observation.
    fn reset(&mut self) -> Self::State;

    /// Apply one action, mutate internal state, return the next observation
    /// and the step reward.
    fn step(&mut self, action: &Self::Action) -> (Self::State, Reward);

    /// Whether an observation reflects a device fault. Reporting only.
    fn is_fault(_state: &Self::State) -> bool {
        false
    }
}

/// Reward for the ground-truth action.
pub const REWARD_CORRECT: Reward = 1.0;
/// Reward for any other action.
pub const REWARD_WRONG: Reward = -1.0;
/// Reward when a step drives the mower into its error state.
pub const REWARD_FAULT: Reward = -5.0;

/// Steps spent mowing before the battery bucket drops to low.
const MOW_STEPS_TO_LOW: u32 = 5;
/// Steps spent docked before the battery bucket recovers to high.
const DOCK_STEPS_TO_HIGH: u32 = 3;

/// Full mower simulation: a real [`Mower`] plus discretized weather,
/// battery and obstacle observations.
///
/// Episodes never terminate early; driving into `ERROR` is just another
/// state the reward shaping teaches the agent to leave.
pub struct MowerEnv {
    mower: Mower,
    weather: Weather,
    battery: Battery,
    obstacle: bool,
    mow_steps: u32,
    dock_steps: u32,
    rng: StdRng,
}

impl MowerEnv {
    pub fn new(seed: u64) -> Self {
        Self {
            mower: Mower::new("Sim Mower"),
            weather: Weather::Sunny,
            battery: Battery::High,
            obstacle: false,
            mow_steps: 0,
            dock_steps: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn observation(&self) -> MowerObs {
        MowerObs {
            activity: self.mower.activity(),
            weather: self.weather,
            battery: self.battery,
            obstacle: self.obstacle,
        }
    }

    /// The unique optimal action for an observation; first matching rule
    /// wins. Faults take priority, then the obstacle, then battery, then
    /// weather, then the fair-weather mow/pause/resume cycle.
    pub fn ground_truth(obs: &MowerObs) -> MowerAction {
        if obs.activity == MowerActivity::Error {
            return MowerAction::ClearError;
        }
        if obs.obstacle {
            return if obs.activity == MowerActivity::Mowing {
                MowerAction::Pause
            } else {
                MowerAction::Dock
            };
        }
        if obs.battery == Battery::Low {
            return match obs.activity {
                MowerActivity::Returning | MowerActivity::Docked => MowerAction::Dock,
                _ => MowerAction::ReturnToDock,
            };
        }
        if obs.weather == Weather::Rainy {
            return if obs.activity == MowerActivity::Mowing {
                MowerAction::ReturnToDock
            } else {
                MowerAction::Dock
            };
        }
        match obs.activity {
            MowerActivity::Docked => MowerAction::StartMowing,
            MowerActivity::Mowing => MowerAction::Pause,
            MowerActivity::Paused => MowerAction::Resume,
            MowerActivity::Returning => MowerAction::Dock,
            MowerActivity::Error => MowerAction::ClearError,
        }
    }

    fn apply(&mut self, action: &MowerAction) {
        // The mower's own guards decide acceptance; a rejection leaves the
        // activity unchanged and simply earns the wrong-action reward.
        let report = match action {
            MowerAction::StartMowing => self.mower.start_mowing(),
            MowerAction::Dock => self.mower.dock(),
            MowerAction::ReturnToDock => self.mower.return_to_dock(),
            MowerAction::Pause => self.mower.pause(),
            MowerAction::Resume => self.mower.resume(),
            MowerAction::ClearError => self.mower.clear_error(),
        };
        debug!(action = %action, outcome = ?report.outcome, "applied mower action");
    }
}

impl Environment for MowerEnv {
    type State = MowerObs;
    type Action = MowerAction;

    fn reset(&mut self) -> MowerObs {
        self.mower.clear_error();
        self.weather = if self.rng.gen_bool(0.5) {
            Weather::Sunny
        } else {
            Weather::Rainy
        };
        self.battery = if self.rng.gen_bool(0.5) {
            Battery::High
        } else {
            Battery::Low
        };
        self.obstacle = self.rng.gen_bool(0.5);
        self.mow_steps = 0;
        self.dock_steps = 0;
        self.observation()
    }

    fn step(&mut self, action: &MowerAction) -> (MowerObs, Reward) {
        let before = self.observation();
        let correct = Self::ground_truth(&before);

        self.apply(action);

        let mut reward = if *action == correct {
            REWARD_CORRECT
        } else {
            REWARD_WRONG
        };

        // Mowing over an obstacle is the one way to break the machine.
        if self.obstacle && self.mower.activity() == MowerActivity::Mowing {
            self.mower.set_error("obstacle in path");
            reward = REWARD_FAULT;
        }

        // Deterministic auxiliary transitions. Weather is fixed for the
        // whole episode.
        match self.mower.activity() {
            MowerActivity::Mowing => {
                self.mow_steps += 1;
                self.dock_steps = 0;
                if self.mow_steps >= MOW_STEPS_TO_LOW {
                    self.battery = Battery::Low;
                }
            }
            MowerActivity::Docked => {
                self.dock_steps += 1;
                self.mow_steps = 0;
                self.obstacle = false;
                if self.dock_steps >= DOCK_STEPS_TO_HIGH {
                    self.battery = Battery::High;
                }
            }
            _ => {
                self.mow_steps = 0;
                self.dock_steps = 0;
            }
        }

        (self.observation(), reward)
    }

    fn is_fault(state: &MowerObs) -> bool {
        state.activity == MowerActivity::Error
    }
}

/// Stationary environment defined directly by a ground-truth table: the
/// state never changes within an episode and each step pays +1/-1 against
/// the table. Used for convergence tests and benchmarks.
pub struct PolicyEnv<S, A> {
    policy: HashMap<S, A>,
    states: Vec<S>,
    current: S,
    rng: StdRng,
}

impl<S, A> PolicyEnv<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + PartialEq,
{
    /// Builds the environment from (state, optimal action) entries. Entry
    /// order fixes the reset domain; the first entry is the initial state.
    pub fn new(entries: Vec<(S, A)>, seed: u64) -> Self {
        assert!(!entries.is_empty(), "policy table must not be empty");
        let states: Vec<S> = entries.iter().map(|(s, _)| s.clone()).collect();
        let current = states[0].clone();
        Self {
            policy: entries.into_iter().collect(),
            states,
            current,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn optimal_action(&self, state: &S) -> Option<&A> {
        self.policy.get(state)
    }
}

impl<S, A> Environment for PolicyEnv<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + PartialEq,
{
    type State = S;
    type Action = A;

    fn reset(&mut self) -> S {
        let idx = self.rng.gen_range(0..self.states.len());
        self.current = self.states[idx].clone();
        self.current.clone()
    }

    fn step(&mut self, action: &A) -> (S, Reward) {
        let reward = match self.policy.get(&self.current) {
            Some(optimal) if optimal == action => REWARD_CORRECT,
            _ => REWARD_WRONG,
        };
        (self.current.clone(), reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_forces_docked() {
        let mut env = MowerEnv::new(3);
        env.step(&MowerAction::StartMowing);
        let obs = env.reset();
        assert_eq!(obs.activity, MowerActivity::Docked);
    }

    #[test]
    fn test_ground_truth_priorities() {
        let obs = MowerObs {
            activity: MowerActivity::Error,
            weather: Weather::Rainy,
            battery: Battery::Low,
            obstacle: true,
        };
        assert_eq!(MowerEnv::ground_truth(&obs), MowerAction::ClearError);

        let obs = MowerObs {
            activity: MowerActivity::Mowing,
            weather: Weather::Sunny,
            battery: Battery::High,
            obstacle: true,
        };
        assert_eq!(MowerEnv::ground_truth(&obs), MowerAction::Pause);

        let obs = MowerObs {
            activity: MowerActivity::Mowing,
            weather: Weather::Sunny,
            battery: Battery::Low,
            obstacle: false,
        };
        assert_eq!(MowerEnv::ground_truth(&obs), MowerAction::ReturnToDock);

        let obs = MowerObs {
            activity: MowerActivity::Mowing,
            weather: Weather::Rainy,
            battery: Battery::High,
            obstacle: false,
        };
        assert_eq!(MowerEnv::ground_truth(&obs), MowerAction::ReturnToDock);

        let obs = MowerObs {
            activity: MowerActivity::Docked,
            weather: Weather::Sunny,
            battery: Battery::High,
            obstacle: false,
        };
        assert_eq!(MowerEnv::ground_truth(&obs), MowerAction::StartMowing);
    }

    #[test]
    fn test_correct_action_pays_positive() {
        let mut env = MowerEnv::new(11);
        let obs = env.reset();
        let correct = MowerEnv::ground_truth(&obs);
        let (_, reward) = env.step(&correct);
        assert_eq!(reward, REWARD_CORRECT);
    }

    #[test]
    fn test_mowing_over_obstacle_faults() {
        // Seeds differ in reset outcomes; scan for an episode that starts
        // with an obstacle and fair conditions, then mow into it.
        for seed in 0..64 {
            let mut env = MowerEnv::new(seed);
            let obs = env.reset();
            if obs.obstacle && obs.activity == MowerActivity::Docked {
                let (next, reward) = env.step(&MowerAction::StartMowing);
                assert_eq!(reward, REWARD_FAULT);
                assert_eq!(next.activity, MowerActivity::Error);
                assert!(MowerEnv::is_fault(&next));
                return;
            }
        }
        panic!("no seed produced an obstacle start in 64 tries");
    }

    #[test]
    fn test_battery_drains_while_mowing() {
        for seed in 0..64 {
            let mut env = MowerEnv::new(seed);
            let obs = env.reset();
            if obs.battery == Battery::High && !obs.obstacle {
                env.step(&MowerAction::StartMowing);
                for _ in 0..5 {
                    env.step(&MowerAction::StartMowing);
                }
                assert_eq!(env.observation().battery, Battery::Low);
                return;
            }
        }
        panic!("no seed produced a high-battery obstacle-free start in 64 tries");
    }

    #[test]
    fn test_battery_recovers_while_docked() {
        for seed in 0..64 {
            let mut env = MowerEnv::new(seed);
            let obs = env.reset();
            if obs.battery == Battery::Low {
                for _ in 0..3 {
                    env.step(&MowerAction::Dock);
                }
                assert_eq!(env.observation().battery, Battery::High);
                return;
            }
        }
        panic!("no seed produced a low-battery start in 64 tries");
    }

    #[test]
    fn test_obstacle_clears_when_docked() {
        for seed in 0..64 {
            let mut env = MowerEnv::new(seed);
            let obs = env.reset();
            if obs.obstacle {
                env.step(&MowerAction::Dock);
                assert!(!env.observation().obstacle);
                return;
            }
        }
        panic!("no seed produced an obstacle start in 64 tries");
    }

    #[test]
    fn test_policy_env_rewards() {
        let mut env = PolicyEnv::new(vec![("a", 1), ("b", 2)], 5);
        let state = env.reset();
        let optimal = *env.optimal_action(&state).unwrap();
        let (next, reward) = env.step(&optimal);
        assert_eq!(reward, REWARD_CORRECT);
        assert_eq!(next, state);

        let (_, reward) = env.step(&99);
        assert_eq!(reward, REWARD_WRONG);
    }
}
