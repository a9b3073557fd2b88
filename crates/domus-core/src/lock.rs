//! Door lock state machine with jam detection
//!
//! Unlike the other devices the lock keeps its state behind a mutex so that
//! two async operations on one shared device can genuinely overlap. The
//! transient `locking`/`unlocking` flags exist purely so the lock itself can
//! detect that overlap: a second request arriving while either flag is set
//! jams the device instead of queueing. Once an operation has begun its hold
//! it always completes and applies its transition, even if a jam lands in
//! the meantime.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::report::OpReport;
use crate::DEVICE_DELAY;

/// Snapshot of the lock's observable attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockStatus {
    pub locked: bool,
    pub jammed: bool,
    pub locking: bool,
    pub unlocking: bool,
}

impl LockStatus {
    /// Single discrete label for the decision agent, jam reported first.
    pub fn label(&self) -> &'static str {
        if self.jammed {
            "Jammed"
        } else if self.locking {
            "Locking"
        } else if self.unlocking {
            "Unlocking"
        } else if self.locked {
            "Locked"
        } else {
            "Unlocked"
        }
    }
}

#[derive(Debug, Default)]
struct LockState {
    locked: bool,
    jammed: bool,
    locking: bool,
    unlocking: bool,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Lock,
    Unlock,
}

impl Direction {
    fn verb(self) -> &'static str {
        match self {
            Direction::Lock => "lock",
            Direction::Unlock => "unlock",
        }
    }
}

/// Whether a guarded request may proceed to its hold phase.
enum Gate {
    Proceed,
    Finished(OpReport),
}

/// Simulated door lock.
pub struct Lock {
    name: String,
    state: Mutex<LockState>,
}

impl Lock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(LockState::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn inner(&self) -> std::sync::MutexGuard<'_, LockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> LockStatus {
        let s = self.inner();
        LockStatus {
            locked: s.locked,
            jammed: s.jammed,
            locking: s.locking,
            unlocking: s.unlocking,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.inner().locked
    }

    pub fn is_jammed(&self) -> bool {
        self.inner().jammed
    }

    /// Manual fault injection, callable at any time.
    pub fn jam(&self) -> OpReport {
        let mut s = self.inner();
        Self::jam_inner(&mut s);
        let detail = format!("{} is JAMMED", self.name);
        warn!(lock = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    fn jam_inner(s: &mut LockState) {
        s.jammed = true;
        s.locking = false;
        s.unlocking = false;
    }

    /// Clears a jam. Always leaves the lock unlocked: clearing a fault must
    /// never silently keep the door locked.
    pub fn clear_jam(&self) -> OpReport {
        let mut s = self.inner();
        s.jammed = false;
        s.locked = false;
        s.locking = false;
        s.unlocking = false;
        let detail = format!("clearing jam on {}", self.name);
        info!(lock = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    /// Guard phase shared by sync and async forms. On `Proceed` the
    /// direction's transient flag has been raised.
    fn begin(&self, dir: Direction, code: Option<&str>) -> Gate {
        let mut s = self.inner();

        if s.jammed {
            let detail = format!("cannot {} {}: it is jammed", dir.verb(), self.name);
            warn!(lock = %self.name, "{detail}");
            return Gate::Finished(OpReport::rejected(detail));
        }

        // Overlapping requests are a hardware fault, whichever direction
        // either of them had.
        if s.locking || s.unlocking {
            Self::jam_inner(&mut s);
            let detail = format!(
                "conflict detected while trying to {} {}: lock jammed",
                dir.verb(),
                self.name
            );
            warn!(lock = %self.name, "{detail}");
            return Gate::Finished(OpReport::conflict(detail));
        }

        match dir {
            Direction::Lock if s.locked => {
                let detail = format!("{} is already locked", self.name);
                info!(lock = %self.name, "{detail}");
                return Gate::Finished(OpReport::noop(detail));
            }
            Direction::Unlock if !s.locked => {
                let detail = format!("{} is already unlocked", self.name);
                info!(lock = %self.name, "{detail}");
                return Gate::Finished(OpReport::noop(detail));
            }
            _ => {}
        }

        match dir {
            Direction::Lock => s.locking = true,
            Direction::Unlock => s.unlocking = true,
        }
        info!(
            lock = %self.name,
            code = code.unwrap_or("-"),
            "{} {}", dir.verb(), self.name
        );
        Gate::Proceed
    }

    /// Apply phase. Runs unconditionally once the hold began: a jam that
    /// landed during the hold does not cancel the transition.
    fn finish(&self, dir: Direction) -> OpReport {
        let mut s = self.inner();
        match dir {
            Direction::Lock => {
                s.locked = true;
                s.locking = false;
            }
            Direction::Unlock => {
                s.locked = false;
                s.unlocking = false;
            }
        }
        let detail = format!("{} {}ed", self.name, dir.verb());
        info!(lock = %self.name, "{detail}");
        OpReport::accepted(detail)
    }

    /// Synchronous lock: same guards and transition, no hold.
    pub fn lock(&self, code: Option<&str>) -> OpReport {
        match self.begin(Direction::Lock, code) {
            Gate::Finished(report) => report,
            Gate::Proceed => self.finish(Direction::Lock),
        }
    }

    /// Synchronous unlock: same guards and transition, no hold.
    pub fn unlock(&self, code: Option<&str>) -> OpReport {
        match self.begin(Direction::Unlock, code) {
            Gate::Finished(report) => report,
            Gate::Proceed => self.finish(Direction::Unlock),
        }
    }

    /// Lock with the simulated actuation delay. The guard runs before the
    /// hold, so a second request arriving mid-hold sees the transient flag
    /// and triggers the conflict rule.
    pub async fn lock_async(&self, code: Option<&str>) -> OpReport {
        match self.begin(Direction::Lock, code) {
            Gate::Finished(report) => report,
            Gate::Proceed => {
                tokio::time::sleep(DEVICE_DELAY).await;
                self.finish(Direction::Lock)
            }
        }
    }

    /// Unlock with the simulated actuation delay.
    pub async fn unlock_async(&self, code: Option<&str>) -> OpReport {
        match self.begin(Direction::Unlock, code) {
            Gate::Finished(report) => report,
            Gate::Proceed => {
                tokio::time::sleep(DEVICE_DELAY).await;
                self.finish(Direction::Unlock)
            }
        }
    }

    /// Fault injection with the simulated actuation delay. Unconditional
    /// like [`Lock::jam`], so no guard phase is needed.
    pub async fn jam_async(&self) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.jam()
    }

    pub async fn clear_jam_async(&self) -> OpReport {
        tokio::time::sleep(DEVICE_DELAY).await;
        self.clear_jam()
    }
}
