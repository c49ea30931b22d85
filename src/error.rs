//! Error types
//!
//! Gameplay itself never fails; these cover the edges where the game meets
//! the player (name entry), the page (sprites, configuration) and the network
//! (leaderboard).

use thiserror::Error;

use crate::sim::GamePhase;

/// Why a player name was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name is empty")]
    Empty,
    #[error("name has {len} characters, at most {max} allowed")]
    TooLong { len: usize, max: usize },
}

/// Refused game phase transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid player name: {0}")]
    InvalidName(#[from] NameError),
    #[error("cannot {action} while in {phase:?}")]
    WrongPhase {
        action: &'static str,
        phase: GamePhase,
    },
}

/// Sprite loading failure (fatal to startup)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("failed to load sprite `{path}`")]
    Load { path: &'static str },
    #[error("page is missing `{0}`")]
    Dom(&'static str),
}

/// Leaderboard fetch failure (recoverable, logged)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server answered HTTP {0}")]
    Status(u16),
    #[error("malformed leaderboard payload: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for LeaderboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Invalid tuning overrides
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Parse(String),
    #[error("tuning value `{field}` is out of range")]
    Invalid { field: &'static str },
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = SessionError::from(NameError::TooLong { len: 8, max: 5 });
        assert_eq!(
            err.to_string(),
            "invalid player name: name has 8 characters, at most 5 allowed"
        );

        let err = SessionError::WrongPhase {
            action: "restart",
            phase: GamePhase::Playing,
        };
        assert_eq!(err.to_string(), "cannot restart while in Playing");
    }
}
