//! Data structures for the meetup: players, roster, groups, bracket, meetup state.

mod bracket;
mod group;
mod meetup;
mod player;
mod roster;

pub use bracket::{Bracket, BracketError, Match, TeamField, FINAL_SLOT, FIRST_ROUND_SLOTS, MATCH_COUNT};
pub use group::{Group, GroupSummary, Grouping};
pub use meetup::{Meetup, MeetupId, MIN_GROUP_COUNT};
pub use player::{normalize_name, Player, PlayerId};
pub use roster::{PlayerFilter, Roster, RosterError};
