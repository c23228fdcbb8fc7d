//! Game state machine shared by both games
//!
//! `Waiting → Playing ↔ Paused`, `Playing → GameOver | Win`, anything → `Waiting` on reset.
//! Only `Playing` lets ticks and collisions touch the simulation.

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Fresh board, waiting for start
    #[default]
    Waiting,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended in a loss
    GameOver,
    /// Every level cleared (breaker only)
    Win,
}

impl GamePhase {
    /// Whether ticks and collision checks may mutate state
    pub fn is_playing(self) -> bool {
        self == GamePhase::Playing
    }

    /// Terminal phases only leave through start or reset
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }

    pub fn can_start(self) -> bool {
        matches!(self, GamePhase::Waiting) || self.is_terminal()
    }

    /// Phase after a pause toggle; other phases are unaffected
    pub fn toggled_pause(self) -> Self {
        match self {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_toggle_only_affects_play() {
        assert_eq!(GamePhase::Playing.toggled_pause(), GamePhase::Paused);
        assert_eq!(GamePhase::Paused.toggled_pause(), GamePhase::Playing);
        assert_eq!(GamePhase::Waiting.toggled_pause(), GamePhase::Waiting);
        assert_eq!(GamePhase::GameOver.toggled_pause(), GamePhase::GameOver);
        assert_eq!(GamePhase::Win.toggled_pause(), GamePhase::Win);
    }

    #[test]
    fn test_start_gates() {
        assert!(GamePhase::Waiting.can_start());
        assert!(GamePhase::GameOver.can_start());
        assert!(GamePhase::Win.can_start());
        assert!(!GamePhase::Playing.can_start());
        assert!(!GamePhase::Paused.can_start());
    }

    #[test]
    fn test_phase_tag_serializes_camel_case() {
        let json = serde_json::to_string(&GamePhase::GameOver).unwrap();
        assert_eq!(json, "\"gameOver\"");
    }
}
