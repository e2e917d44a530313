//! Meetup business logic: balanced team generation, bracket propagation, roster CSV.

mod balance;
mod bracket;
mod roster_csv;

pub use balance::{generate_balanced_groups, generate_balanced_groups_with_rng, TOP_CANDIDATES, TRIALS};
pub use bracket::{advance_winner, set_match_team};
pub use roster_csv::{export_roster_csv, import_roster_csv};
