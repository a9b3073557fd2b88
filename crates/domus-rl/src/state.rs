//! State and action types for the device environments

use serde::{Deserialize, Serialize};

use domus_core::MowerActivity;

/// Reward value from an environment step.
pub type Reward = f64;

/// Weather bucket observed by the mower environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weather {
    Sunny,
    Rainy,
}

/// Battery bucket: the agent never sees a continuous charge level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Battery {
    High,
    Low,
}

/// Full observation of the mower environment. The state is completely
/// determined by these discrete fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MowerObs {
    pub activity: MowerActivity,
    pub weather: Weather,
    pub battery: Battery,
    pub obstacle: bool,
}

/// Commands the agent may issue to the mower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MowerAction {
    StartMowing,
    Dock,
    ReturnToDock,
    Pause,
    Resume,
    ClearError,
}

impl MowerAction {
    /// Fixed enumeration order; doubles as the greedy tie-break order.
    pub const ALL: [MowerAction; 6] = [
        MowerAction::StartMowing,
        MowerAction::Dock,
        MowerAction::ReturnToDock,
        MowerAction::Pause,
        MowerAction::Resume,
        MowerAction::ClearError,
    ];
}

impl std::fmt::Display for MowerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MowerAction::StartMowing => "START_MOWING",
            MowerAction::Dock => "DOCK",
            MowerAction::ReturnToDock => "RETURN_TO_DOCK",
            MowerAction::Pause => "PAUSE",
            MowerAction::Resume => "RESUME",
            MowerAction::ClearError => "CLEAR_ERROR",
        };
        write!(f, "{label}")
    }
}
