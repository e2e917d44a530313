//! Meetup: the state of one sports night (roster, generated teams, bracket).

use crate::logic::{advance_winner, generate_balanced_groups_with_rng, set_match_team};
use crate::models::bracket::{Bracket, BracketError, TeamField};
use crate::models::group::Grouping;
use crate::models::roster::Roster;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

/// Unique identifier for a meetup.
pub type MeetupId = Uuid;

/// Smallest group count that makes sense for team generation.
pub const MIN_GROUP_COUNT: usize = 2;

/// Full meetup state. The server holds the current snapshot and replaces pieces of it
/// with the results of generation and bracket operations.
#[derive(Clone, Debug, Serialize)]
pub struct Meetup {
    pub id: MeetupId,
    pub created_at: DateTime<Utc>,
    pub roster: Roster,
    /// Number of teams requested for team generation (at least 2).
    pub group_count: usize,
    /// Result of the last team generation.
    pub groups: Grouping,
    pub bracket: Bracket,
}

impl Default for Meetup {
    fn default() -> Self {
        Self::new()
    }
}

impl Meetup {
    /// Create an empty meetup: no players, two teams requested, empty bracket.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            roster: Roster::new(),
            group_count: MIN_GROUP_COUNT,
            groups: Grouping::empty(),
            bracket: Bracket::new(),
        }
    }

    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster,
            ..Self::new()
        }
    }

    /// Set the requested number of teams; values below 2 are raised to 2.
    pub fn set_group_count(&mut self, group_count: usize) {
        self.group_count = group_count.max(MIN_GROUP_COUNT);
    }

    /// Regenerate teams from checked-in players, replacing the previous result.
    pub fn generate_groups(&mut self) -> &Grouping {
        self.generate_groups_with_rng(&mut rand::thread_rng())
    }

    pub fn generate_groups_with_rng(&mut self, rng: &mut impl Rng) -> &Grouping {
        let attendance = self.roster.attendance();
        self.groups = generate_balanced_groups_with_rng(
            &self.roster.players,
            &attendance,
            self.group_count,
            rng,
        );
        &self.groups
    }

    /// Type a team name into a first-round match. On error the bracket is unchanged.
    pub fn set_match_team(
        &mut self,
        slot: usize,
        field: TeamField,
        value: impl Into<String>,
    ) -> Result<(), BracketError> {
        self.bracket = set_match_team(&self.bracket, slot, field, value)?;
        Ok(())
    }

    /// Advance a team as winner of a match. On error the bracket is unchanged.
    pub fn advance_winner(&mut self, slot: usize, team: &str) -> Result<(), BracketError> {
        self.bracket = advance_winner(&self.bracket, slot, team)?;
        Ok(())
    }

    pub fn reset_bracket(&mut self) {
        self.bracket = Bracket::new();
    }
}
