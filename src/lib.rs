//! Sports meetup organizer: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_winner, export_roster_csv, generate_balanced_groups, generate_balanced_groups_with_rng,
    import_roster_csv, set_match_team,
};
pub use models::{
    normalize_name, Bracket, BracketError, Group, GroupSummary, Grouping, Match, Meetup, MeetupId,
    Player, PlayerFilter, PlayerId, Roster, RosterError, TeamField,
};
