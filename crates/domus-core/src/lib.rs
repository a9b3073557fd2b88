//! Domus Core - Simulated smart-home devices
//!
//! This crate provides the deterministic device state machines (lawn mower,
//! door lock, fan) shared by the rest of the workspace. Every mutating
//! operation reports a structured [`OpReport`] instead of raising; a refused
//! transition leaves state untouched.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod fan;
pub mod lock;
pub mod mower;
pub mod report;

pub use error::{DomusError, Result};
pub use fan::Fan;
pub use lock::{Lock, LockStatus};
pub use mower::{Mower, MowerActivity};
pub use report::{OpReport, Outcome};

use std::time::Duration;

/// Simulated latency applied by every async device operation.
pub const DEVICE_DELAY: Duration = Duration::from_millis(100);
