//! The fixed command token set

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use domus_core::DomusError;

/// Commands the lock agent can execute. The wire tokens are exactly
/// `Lock`, `Unlock`, `ClearJam` and `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockCommand {
    Lock,
    Unlock,
    ClearJam,
    #[serde(rename = "None")]
    NoAction,
}

impl LockCommand {
    /// All allowed response tokens, in the order the oracle prompt lists
    /// them.
    pub const TOKENS: [&'static str; 4] = ["Lock", "Unlock", "ClearJam", "None"];

    pub fn token(self) -> &'static str {
        match self {
            LockCommand::Lock => "Lock",
            LockCommand::Unlock => "Unlock",
            LockCommand::ClearJam => "ClearJam",
            LockCommand::NoAction => "None",
        }
    }
}

impl std::fmt::Display for LockCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for LockCommand {
    type Err = DomusError;

    /// Accepts exactly the bare tokens; callers coerce anything else to
    /// [`LockCommand::NoAction`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lock" => Ok(LockCommand::Lock),
            "Unlock" => Ok(LockCommand::Unlock),
            "ClearJam" => Ok(LockCommand::ClearJam),
            "None" => Ok(LockCommand::NoAction),
            other => Err(DomusError::InvalidToken(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_tokens_parse() {
        assert_eq!("Lock".parse::<LockCommand>().unwrap(), LockCommand::Lock);
        assert_eq!("Unlock".parse::<LockCommand>().unwrap(), LockCommand::Unlock);
        assert_eq!(
            "ClearJam".parse::<LockCommand>().unwrap(),
            LockCommand::ClearJam
        );
        assert_eq!("None".parse::<LockCommand>().unwrap(), LockCommand::NoAction);
    }

    #[test]
    fn test_anything_else_is_an_error() {
        assert!("lock".parse::<LockCommand>().is_err());
        assert!("LOCK".parse::<LockCommand>().is_err());
        assert!("Lock the door".parse::<LockCommand>().is_err());
        assert!("".parse::<LockCommand>().is_err());
    }

    #[test]
    fn test_coercion_pattern() {
        let coerced = "garbage".parse().unwrap_or(LockCommand::NoAction);
        assert_eq!(coerced, LockCommand::NoAction);
    }

    #[test]
    fn test_token_round_trip() {
        for token in LockCommand::TOKENS {
            let cmd: LockCommand = token.parse().unwrap();
            assert_eq!(cmd.token(), token);
        }
    }

    #[test]
    fn test_serde_uses_wire_tokens() {
        assert_eq!(
            serde_json::to_string(&LockCommand::NoAction).unwrap(),
            "\"None\""
        );
        assert_eq!(
            serde_json::to_string(&LockCommand::ClearJam).unwrap(),
            "\"ClearJam\""
        );
    }
}
