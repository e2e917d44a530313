//! Player data structure and name normalization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used by the API for edits and deletes).
pub type PlayerId = Uuid;

/// Normalized form of a player name: trimmed and lowercased.
/// Two names that normalize equally refer to the same player.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A player on the roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// 0 means unrated; rated players have a skill > 0.
    pub skill: f64,
}

impl Player {
    /// Create a new player with the given name and skill.
    pub fn new(name: impl Into<String>, skill: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            skill,
        }
    }

    /// Create an unrated player (skill 0), as self-registration does.
    pub fn unrated(name: impl Into<String>) -> Self {
        Self::new(name, 0.0)
    }

    pub fn is_rated(&self) -> bool {
        self.skill > 0.0
    }

    /// True if `name` refers to this player (case/whitespace-insensitive).
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}
