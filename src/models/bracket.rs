//! Bracket, Match and TeamField for the fixed 8-team single-elimination bracket.

use serde::{Deserialize, Serialize};

/// Number of matches in the bracket: 4 first-round, 2 semifinals, 1 final.
pub const MATCH_COUNT: usize = 7;
/// First-round slots are `0..FIRST_ROUND_SLOTS`; only these take typed team names.
pub const FIRST_ROUND_SLOTS: usize = 4;
/// Slot index of the final.
pub const FINAL_SLOT: usize = 6;

/// Errors from bracket operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Slot is out of range for the operation (team entry: 0..=3, winners: 0..=6).
    InvalidSlot(usize),
    /// The selected team is not one of the match's (non-empty) teams.
    InvalidTeamSelection { slot: usize, team: String },
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InvalidSlot(slot) => write!(f, "Invalid bracket slot {}", slot),
            BracketError::InvalidTeamSelection { slot, team } => {
                write!(f, "Team '{}' is not playing in match {}", team, slot)
            }
        }
    }
}

impl std::error::Error for BracketError {}

/// Which side of a match a team name occupies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TeamField {
    #[serde(rename = "team1")]
    Team1,
    #[serde(rename = "team2")]
    Team2,
}

impl TeamField {
    /// Field a feeder match writes into downstream: even slots feed team1, odd slots team2.
    pub fn for_feeder(slot: usize) -> Self {
        if slot % 2 == 0 {
            TeamField::Team1
        } else {
            TeamField::Team2
        }
    }
}

/// A single bracket match. Empty strings mean "no team yet".
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Match {
    pub(crate) team1: String,
    pub(crate) team2: String,
    /// None until a winner is advanced.
    pub(crate) winner: Option<String>,
}

impl Match {
    pub fn team1(&self) -> &str {
        &self.team1
    }

    pub fn team2(&self) -> &str {
        &self.team2
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn team(&self, field: TeamField) -> &str {
        match field {
            TeamField::Team1 => &self.team1,
            TeamField::Team2 => &self.team2,
        }
    }

    /// True if `team` is one of the match's non-empty teams.
    pub fn has_team(&self, team: &str) -> bool {
        !team.is_empty() && (self.team1 == team || self.team2 == team)
    }

    pub(crate) fn set_team(&mut self, field: TeamField, value: String) {
        match field {
            TeamField::Team1 => self.team1 = value,
            TeamField::Team2 => self.team2 = value,
        }
    }

    /// Drop the winner unless it still equals `team`.
    pub(crate) fn keep_winner_if(&mut self, team: &str) {
        if self.winner.as_deref() != Some(team) {
            self.winner = None;
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Match::default();
    }
}

/// The full bracket: slots 0-3 are round one, 4-5 the semifinals, 6 the final.
///
/// Slot 4 takes the winners of slots 0 and 1, slot 5 those of 2 and 3, and the
/// final those of 4 and 5. Fields are only changed through the operations in
/// `logic::bracket`, which return a new snapshot.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Bracket {
    pub(crate) matches: [Match; MATCH_COUNT],
}

impl Bracket {
    /// A bracket with every team empty and no winners.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get(&self, slot: usize) -> Option<&Match> {
        self.matches.get(slot)
    }

    pub fn final_match(&self) -> &Match {
        &self.matches[FINAL_SLOT]
    }

    /// Champion, once the final has a winner.
    pub fn champion(&self) -> Option<&str> {
        self.final_match().winner()
    }

    /// Slot fed by `slot`'s winner, or None for the final.
    pub fn next_slot(slot: usize) -> Option<usize> {
        match slot {
            0..=3 => Some(FIRST_ROUND_SLOTS + slot / 2),
            4 | 5 => Some(FINAL_SLOT),
            _ => None,
        }
    }
}
