//! Domus Agent - natural-language lock control
//!
//! Maps free-text scenarios to lock commands through a pluggable decision
//! oracle. The oracle is a black box returning one token from a fixed closed
//! set; anything else is coerced to the neutral no-action token. A jammed
//! lock never consults the oracle at all.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod lock_agent;
pub mod oracle;

pub use command::LockCommand;
pub use lock_agent::{Decision, LockAgent, HISTORY_WINDOW};
pub use oracle::{CompletionOracle, DecisionOracle, OracleConfig, ScriptedOracle};
