//! Roster import/export as CSV with a `name,skill` header.

use crate::models::{Roster, RosterError};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug, Serialize, Deserialize)]
struct RosterRow {
    name: String,
    /// Missing column or blank cell means unrated.
    #[serde(default)]
    skill: Option<f64>,
}

fn csv_error(e: impl std::fmt::Display) -> RosterError {
    RosterError::Csv(e.to_string())
}

/// Merge players from CSV into the roster. Returns the number of rows applied.
///
/// Rows with a skill > 0 add or update the player; rows with skill 0 (or no skill)
/// register an unrated player unless one with that name already exists. Nothing is
/// applied if any row is invalid; errors name the file line of the bad row.
pub fn import_roster_csv(roster: &mut Roster, reader: impl Read) -> Result<usize, RosterError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().map_err(csv_error)?.clone();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map_or(0, |p| p.line());
        let row: RosterRow = record.deserialize(Some(&headers)).map_err(csv_error)?;
        let skill = row.skill.unwrap_or(0.0);
        if skill < 0.0 || !skill.is_finite() {
            return Err(RosterError::Csv(format!(
                "line {}: invalid skill for '{}'",
                line, row.name
            )));
        }
        rows.push((line, row.name, skill));
    }

    let mut updated = roster.clone();
    for (line, name, skill) in &rows {
        let applied = if *skill > 0.0 {
            updated.save_player(name, *skill).map(|_| ())
        } else if updated.find(name).is_none() {
            updated.register(name).map(|_| ())
        } else {
            Ok(())
        };
        applied.map_err(|e| RosterError::Csv(format!("line {}: {}", line, e)))?;
    }
    *roster = updated;
    log::info!("Imported {} roster rows", rows.len());
    Ok(rows.len())
}

/// Write every player as a `name,skill` row.
pub fn export_roster_csv(roster: &Roster, writer: impl Write) -> Result<(), RosterError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for p in &roster.players {
        wtr.serialize(RosterRow {
            name: p.name.clone(),
            skill: Some(p.skill),
        })
        .map_err(csv_error)?;
    }
    wtr.flush().map_err(csv_error)?;
    Ok(())
}
