//! Fan with speed, oscillation, direction and preset modes

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::report::OpReport;
use crate::DEVICE_DELAY;

/// Preset modes supported by every fan.
pub const PRESET_MODES: [&str; 3] = ["eco", "turbo", "normal"];

/// Number of supported speed steps.
pub const SPEED_COUNT: u8 = 100;

/// Simulated fan. Attributes are independent fields: the percentage is
/// clamped to [0, 100] and `on` tracks `percentage > 0` after a speed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fan {
    name: String,
    on: bool,
    percentage: u8,
    oscillating: bool,
    direction: Option<String>,
    preset_mode: Option<String>,
}

impl Fan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on: false,
            percentage: 0,
            oscillating: false,
            direction: None,
            preset_mode: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    pub fn oscillating(&self) -> bool {
        self.oscillating
    }

    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }

    pub fn preset_mode(&self) -> Option<&str> {
        self.preset_mode.as_deref()
    }

    pub fn preset_modes(&self) -> &'static [&'static str] {
        &PRESET_MODES
    }

    pub fn speed_count(&self) -> u8 {
        SPEED_COUNT
    }

    fn clamp(percentage: i32) -> u8 {
        percentage.clamp(0, i32::from(SPEED_COUNT)) as u8
    }

    /// Turn on, optionally with a speed and preset. An unknown preset is
    /// skipped here rather than refusing the whole operation; use
    /// [`Fan::set_preset_mode`] for the validating form.
    pub fn turn_on(&mut self, percentage: Option<i32>, preset_mode: Option<&str>) -> OpReport {
        self.on = true;
        if let Some(p) = percentage {
            self.percentage = Self::clamp(p);
        }
        if let Some(preset) = preset_mode {
            if PRESET_MODES.contains(&preset) {
                self.preset_mode = Some(preset.to_string());
            }
        }
        let detail = format!(
            "turning on {} at {}% (preset: {})",
            self.name,
            self.percentage,
            self.preset_mode.as_deref().unwrap_or("none")
        );
        info!(fan = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    /// Turn off: speed and preset reset, oscillation and direction keep
    /// their last values.
    pub fn turn_off(&mut self) -> OpReport {
        self.on = false;
        self.percentage = 0;
        self.preset_mode = None;
        let detail = format!("turning off {}", self.name);
        info!(fan = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    pub fn set_percentage(&mut self, percentage: i32) -> OpReport {
        self.percentage = Self::clamp(percentage);
        self.on = self.percentage > 0;
        let detail = format!("set {} speed to {}%", self.name, self.percentage);
        info!(fan = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    pub fn oscillate(&mut self, oscillating: bool) -> OpReport {
        self.oscillating = oscillating;
        let detail = format!(
            "oscillation {} for {}",
            if oscillating { "enabled" } else { "disabled" },
            self.name
        );
        info!(fan = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    /// `None` clears the preset and is always accepted; anything outside the
    /// preset list is refused without touching the prior value.
    pub fn set_preset_mode(&mut self, preset_mode: Option<&str>) -> OpReport {
        match preset_mode {
            None => {
                self.preset_mode = None;
                let detail = format!("cleared preset mode for {}", self.name);
                info!(fan = %self.name, "{detail}");
                OpReport::accepted(detail)
            }
            Some(preset) if PRESET_MODES.contains(&preset) => {
                self.preset_mode = Some(preset.to_string());
                let detail = format!("set preset mode to {preset} for {}", self.name);
                info!(fan = %self.name, "{detail}");
                OpReport::accepted(detail)
            }
            Some(other) => {
                let detail = format!("invalid preset mode: {other}");
                warn!(fan = %self.name, "{detail}");
                OpReport::rejected(detail)
            }
        }
    }

    /// Direction is free-form and accepted unconditionally.
    pub fn set_direction(&mut self, direction: impl Into<String>) -> OpReport {
        let direction = direction.into();
        let detail = format!("set direction to {direction} for {}", self.name);
        info!(fan = %self.name, "{detail}");
        self.direction = Some(direction);
        OpReport::accepted(detail)
    }

    pub async fn turn_on_async(
        &mut self,
        percentage: Option<i32>,
        preset_mode: Option<&str>,
    ) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.turn_on(percentage, preset_mode)
    }

    pub async fn turn_off_async(&mut self) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.turn_off()
    }

    pub async fn set_percentage_async(&mut self, percentage: i32) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.set_percentage(percentage)
    }

    pub async fn oscillate_async(&mut self, oscillating: bool) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.oscillate(oscillating)
    }

    pub async fn set_preset_mode_async(&mut self, preset_mode: Option<&str>) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.set_preset_mode(preset_mode)
    }

    pub async fn set_direction_async(&mut self, direction: impl Into<String>) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.set_direction(direction)
    }
}
