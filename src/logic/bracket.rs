//! Bracket operations: typing first-round teams and advancing winners.
//!
//! Both operations take the current bracket and return a new one. Downstream matches
//! whose inputs changed are cleared so a semifinal or final never shows a team that
//! is not the current winner of its feeder match.

use crate::models::{Bracket, BracketError, TeamField, FINAL_SLOT, FIRST_ROUND_SLOTS, MATCH_COUNT};

/// Set a team name in a first-round match (slots 0-3).
///
/// The match keeps its winner only if the winner equals the new value. The semifinal
/// slot this match feeds is cleared along with that semifinal's winner, and the final
/// is cleared entirely.
pub fn set_match_team(
    bracket: &Bracket,
    slot: usize,
    field: TeamField,
    value: impl Into<String>,
) -> Result<Bracket, BracketError> {
    if slot >= FIRST_ROUND_SLOTS {
        return Err(BracketError::InvalidSlot(slot));
    }
    let value = value.into();
    let mut next = bracket.clone();

    let m = &mut next.matches[slot];
    m.keep_winner_if(&value);
    m.set_team(field, value);

    let semi = FIRST_ROUND_SLOTS + slot / 2;
    let semi_match = &mut next.matches[semi];
    semi_match.set_team(TeamField::for_feeder(slot), String::new());
    semi_match.winner = None;

    next.matches[FINAL_SLOT].clear();
    log::debug!("Bracket slot {} {:?} edited; cleared slot {} side and final", slot, field, semi);
    Ok(next)
}

/// Record `team` as the winner of match `slot` (0-6) and carry it forward.
///
/// - Round one: the team fills its semifinal side; that semifinal keeps its winner only
///   if it is still this team. The final is cleared.
/// - Semifinals: the team fills its side of the final (slot 4 -> team1, slot 5 -> team2);
///   the final keeps its winner only if it is still this team.
/// - Final: nothing further.
///
/// `team` must be one of the match's non-empty teams.
pub fn advance_winner(bracket: &Bracket, slot: usize, team: &str) -> Result<Bracket, BracketError> {
    if slot >= MATCH_COUNT {
        return Err(BracketError::InvalidSlot(slot));
    }
    if !bracket.matches[slot].has_team(team) {
        return Err(BracketError::InvalidTeamSelection {
            slot,
            team: team.to_string(),
        });
    }
    let mut next = bracket.clone();
    next.matches[slot].winner = Some(team.to_string());

    if let Some(dest) = Bracket::next_slot(slot) {
        let dest_match = &mut next.matches[dest];
        dest_match.set_team(TeamField::for_feeder(slot), team.to_string());
        dest_match.keep_winner_if(team);
        if dest != FINAL_SLOT {
            next.matches[FINAL_SLOT].clear();
        }
        log::debug!("Advanced '{}' from slot {} to slot {}", team, slot, dest);
    } else {
        log::debug!("'{}' wins the final", team);
    }
    Ok(next)
}
