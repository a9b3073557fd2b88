//! Lawn mower state machine

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::report::OpReport;
use crate::DEVICE_DELAY;

/// Activity states of the mower. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MowerActivity {
    Docked,
    Mowing,
    Paused,
    Returning,
    Error,
}

impl std::fmt::Display for MowerActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MowerActivity::Docked => "DOCKED",
            MowerActivity::Mowing => "MOWING",
            MowerActivity::Paused => "PAUSED",
            MowerActivity::Returning => "RETURNING",
            MowerActivity::Error => "ERROR",
        };
        write!(f, "{label}")
    }
}

/// Simulated smart lawn mower.
///
/// All transitions are guarded: while in `ERROR`, everything except
/// `set_error`/`clear_error` is refused, and `pause`/`resume` only apply from
/// their designated source states. `start_mowing`, `dock` and
/// `return_to_dock` are accepted from any non-error state, so repeating one
/// of them is a state-preserving success rather than a refusal.
#[derive(Debug, Clone)]
pub struct Mower {
    name: String,
    activity: MowerActivity,
    error_message: Option<String>,
}

impl Mower {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activity: MowerActivity::Docked,
            error_message: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn activity(&self) -> MowerActivity {
        self.activity
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Guard shared by every operation other than the error controls.
    fn refuse_if_error(&self, verb: &str) -> Option<OpReport> {
        if self.activity == MowerActivity::Error {
            let message = self.error_message.as_deref().unwrap_or("unknown");
            let detail = format!("{}: cannot {verb}, error present: {message}", self.name);
            warn!(mower = %self.name, "{detail}");
            return Some(OpReport::rejected(detail));
        }
        None
    }

    pub fn start_mowing(&mut self) -> OpReport {
        if let Some(report) = self.refuse_if_error("start mowing") {
            return report;
        }
        self.activity = MowerActivity::Mowing;
        let detail = format!("{} starting mowing", self.name);
        info!(mower = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    pub fn dock(&mut self) -> OpReport {
        if let Some(report) = self.refuse_if_error("dock") {
            return report;
        }
        self.activity = MowerActivity::Docked;
        let detail = format!("{} docking", self.name);
        info!(mower = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    pub fn return_to_dock(&mut self) -> OpReport {
        if let Some(report) = self.refuse_if_error("return to dock") {
            return report;
        }
        self.activity = MowerActivity::Returning;
        let detail = format!("{} returning to dock", self.name);
        info!(mower = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    /// Pause only applies while mowing or returning.
    pub fn pause(&mut self) -> OpReport {
        if let Some(report) = self.refuse_if_error("pause") {
            return report;
        }
        match self.activity {
            MowerActivity::Mowing | MowerActivity::Returning => {
                self.activity = MowerActivity::Paused;
                let detail = format!("{} paused", self.name);
                info!(mower = %self.name, "{detail}");
                OpReport::accepted(detail)
            }
            other => {
                let detail = format!("{}: cannot pause while {other}", self.name);
                warn!(mower = %self.name, "{detail}");
                OpReport::rejected(detail)
            }
        }
    }

    /// Resume only applies while paused.
    pub fn resume(&mut self) -> OpReport {
        if let Some(report) = self.refuse_if_error("resume") {
            return report;
        }
        if self.activity == MowerActivity::Paused {
            self.activity = MowerActivity::Mowing;
            let detail = format!("{} resuming mowing", self.name);
            info!(mower = %self.name, "{detail}");
            OpReport::accepted(detail)
        } else {
            let detail = format!("{}: cannot resume while {}", self.name, self.activity);
            warn!(mower = %self.name, "{detail}");
            OpReport::rejected(detail)
        }
    }

    /// Unconditional transition into the error state.
    pub fn set_error(&mut self, message: impl Into<String>) -> OpReport {
        let message = message.into();
        let detail = format!("{} encountered an error: {message}", self.name);
        warn!(mower = %self.name, "{detail}");
        self.activity = MowerActivity::Error;
        self.error_message = Some(message);
        OpReport::accepted(detail)
    }

    /// Unconditional recovery: clears the message and docks the mower.
    pub fn clear_error(&mut self) -> OpReport {
        self.activity = MowerActivity::Docked;
        self.error_message = None;
        let detail = format!("{} error cleared, returning to docked state", self.name);
        info!(mower = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    pub async fn start_mowing_async(&mut self) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.start_mowing()
    }

    pub async fn dock_async(&mut self) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.dock()
    }

    pub async fn return_to_dock_async(&mut self) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.return_to_dock()
    }

    pub async fn pause_async(&mut self) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.pause()
    }

    pub async fn resume_async(&mut self) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.resume()
    }

    pub async fn set_error_async(&mut self, message: impl Into<String>) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.set_error(message)
    }

    pub async fn clear_error_async(&mut self) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.clear_error()
    }
}
