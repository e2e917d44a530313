//! Roster: registered players plus tonight's check-in list.

use crate::models::player::{normalize_name, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Errors that can occur during roster operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RosterError {
    /// Name is empty after trimming.
    EmptyName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Skill must be a finite number greater than zero when set by an admin.
    InvalidSkill,
    /// No player with this name or id.
    PlayerNotFound(String),
    /// Roster CSV could not be read or written.
    Csv(String),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::EmptyName => write!(f, "Player name must not be empty"),
            RosterError::DuplicatePlayerName => write!(f, "Player already registered"),
            RosterError::InvalidSkill => write!(f, "Skill must be a number greater than 0"),
            RosterError::PlayerNotFound(name) => write!(f, "Player not found in history: {}", name),
            RosterError::Csv(msg) => write!(f, "Roster CSV error: {}", msg),
        }
    }
}

impl std::error::Error for RosterError {}

/// Which players a listing shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerFilter {
    #[default]
    All,
    CheckedIn,
    CheckedOut,
    /// Skill band starting at the given whole number: `[n, n + 0.9]`, except 9 covers `[9, 10]`.
    SkillBand(u8),
    /// Players with no skill assigned yet (skill 0).
    Unrated,
}

impl PlayerFilter {
    fn skill_range(band: u8) -> (f64, f64) {
        let min = f64::from(band);
        let max = if band >= 9 { 10.0 } else { min + 0.9 };
        (min, max)
    }
}

/// All registered players and who is checked in tonight.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<Player>,
    /// Canonical names of checked-in players, at most one entry per player.
    pub checked_in: Vec<String>,
}

fn validated_name(name: &str) -> Result<&str, RosterError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RosterError::EmptyName);
    }
    Ok(trimmed)
}

fn validated_skill(skill: f64) -> Result<f64, RosterError> {
    if !skill.is_finite() || skill <= 0.0 {
        return Err(RosterError::InvalidSkill);
    }
    Ok(skill)
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players,
            checked_in: Vec::new(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.matches_name(name))
    }

    pub fn find_by_id(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Self-registration: adds an unrated player (skill 0). Names are unique, case-insensitive.
    pub fn register(&mut self, name: &str) -> Result<&Player, RosterError> {
        let name = validated_name(name)?;
        if self.find(name).is_some() {
            return Err(RosterError::DuplicatePlayerName);
        }
        self.players.push(Player::unrated(name));
        Ok(&self.players[self.players.len() - 1])
    }

    /// Admin add/update: updates name casing and skill of an existing player, or inserts a new one.
    pub fn save_player(&mut self, name: &str, skill: f64) -> Result<&Player, RosterError> {
        let name = validated_name(name)?;
        let skill = validated_skill(skill)?;
        let idx = match self.players.iter().position(|p| p.matches_name(name)) {
            Some(idx) => {
                let old_name = std::mem::replace(&mut self.players[idx].name, name.to_string());
                self.players[idx].skill = skill;
                self.rename_check_in(&old_name, name);
                idx
            }
            None => {
                self.players.push(Player::new(name, skill));
                self.players.len() - 1
            }
        };
        Ok(&self.players[idx])
    }

    /// Rename and re-rate a player by id. The new name must not belong to another player.
    pub fn edit_player(&mut self, id: PlayerId, name: &str, skill: f64) -> Result<&Player, RosterError> {
        let name = validated_name(name)?;
        let skill = validated_skill(skill)?;
        let taken = self.players.iter().any(|p| p.id != id && p.matches_name(name));
        if taken {
            return Err(RosterError::DuplicatePlayerName);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| RosterError::PlayerNotFound(id.to_string()))?;
        let old_name = std::mem::replace(&mut self.players[idx].name, name.to_string());
        self.players[idx].skill = skill;
        self.rename_check_in(&old_name, name);
        Ok(&self.players[idx])
    }

    /// Delete a player by name; they are checked out as well.
    pub fn remove_player(&mut self, name: &str) -> Result<Player, RosterError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.matches_name(name))
            .ok_or_else(|| RosterError::PlayerNotFound(name.trim().to_string()))?;
        let removed = self.players.remove(idx);
        self.check_out(&removed.name);
        Ok(removed)
    }

    /// Delete a player by id.
    pub fn remove_player_by_id(&mut self, id: PlayerId) -> Result<Player, RosterError> {
        let name = self
            .find_by_id(id)
            .map(|p| p.name.clone())
            .ok_or_else(|| RosterError::PlayerNotFound(id.to_string()))?;
        self.remove_player(&name)
    }

    /// Check in a registered player. Checking in twice is a no-op.
    pub fn check_in(&mut self, name: &str) -> Result<(), RosterError> {
        let canonical = self
            .find(name)
            .map(|p| p.name.clone())
            .ok_or_else(|| RosterError::PlayerNotFound(name.trim().to_string()))?;
        if !self.is_checked_in(&canonical) {
            self.checked_in.push(canonical);
        }
        Ok(())
    }

    /// Check out by name. Unknown or not-checked-in names are ignored.
    pub fn check_out(&mut self, name: &str) {
        let key = normalize_name(name);
        self.checked_in.retain(|n| normalize_name(n) != key);
    }

    pub fn reset_check_ins(&mut self) {
        self.checked_in.clear();
    }

    pub fn is_checked_in(&self, name: &str) -> bool {
        let key = normalize_name(name);
        self.checked_in.iter().any(|n| normalize_name(n) == key)
    }

    pub fn checked_in_count(&self) -> usize {
        self.checked_in.len()
    }

    /// Normalized names of everyone checked in (input to team generation).
    pub fn attendance(&self) -> HashSet<String> {
        self.checked_in.iter().map(|n| normalize_name(n)).collect()
    }

    /// Players matching `filter`, highest skill first.
    pub fn filter(&self, filter: PlayerFilter) -> Vec<&Player> {
        let mut listed: Vec<&Player> = self
            .players
            .iter()
            .filter(|p| match filter {
                PlayerFilter::All => true,
                PlayerFilter::CheckedIn => self.is_checked_in(&p.name),
                PlayerFilter::CheckedOut => !self.is_checked_in(&p.name),
                PlayerFilter::SkillBand(band) => {
                    let (min, max) = PlayerFilter::skill_range(band);
                    p.skill >= min && p.skill <= max
                }
                PlayerFilter::Unrated => !p.is_rated(),
            })
            .collect();
        listed.sort_by(|a, b| b.skill.total_cmp(&a.skill));
        listed
    }

    fn rename_check_in(&mut self, old_name: &str, new_name: &str) {
        let key = normalize_name(old_name);
        for n in self.checked_in.iter_mut() {
            if normalize_name(n) == key {
                *n = new_name.to_string();
            }
        }
    }
}
