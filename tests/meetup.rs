//! Integration tests for the meetup aggregate: team generation and bracket snapshots.

use meetup_night::{BracketError, Meetup, Roster, TeamField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn meetup_with_players(n: usize) -> Meetup {
    let mut roster = Roster::new();
    for i in 0..n {
        roster.save_player(&format!("P{i}"), (i + 1) as f64).unwrap();
    }
    Meetup::with_roster(roster)
}

#[test]
fn group_count_is_at_least_two() {
    let mut m = Meetup::new();
    assert_eq!(m.group_count, 2);
    m.set_group_count(0);
    assert_eq!(m.group_count, 2);
    m.set_group_count(4);
    assert_eq!(m.group_count, 4);
}

#[test]
fn generation_uses_checked_in_players_and_replaces_previous() {
    let mut m = meetup_with_players(8);
    for name in ["p0", "p1", "p2", "p3", "p4", "p5"] {
        m.roster.check_in(name).unwrap();
    }
    m.set_group_count(3);
    let mut rng = StdRng::seed_from_u64(1);
    let grouping = m.generate_groups_with_rng(&mut rng).clone();
    assert_eq!(grouping.len(), 3);
    assert_eq!(grouping.players().count(), 6);
    assert!(grouping.players().all(|p| m.roster.is_checked_in(&p.name)));

    m.roster.reset_check_ins();
    assert!(m.generate_groups().is_empty());
    assert!(m.groups.is_empty());
}

#[test]
fn bracket_errors_leave_snapshot_unchanged() {
    let mut m = Meetup::new();
    m.set_match_team(0, TeamField::Team1, "Reds").unwrap();
    m.set_match_team(0, TeamField::Team2, "Blues").unwrap();
    m.advance_winner(0, "Reds").unwrap();
    let before = m.bracket.clone();

    assert_eq!(
        m.advance_winner(0, "Greens"),
        Err(BracketError::InvalidTeamSelection {
            slot: 0,
            team: "Greens".into()
        })
    );
    assert_eq!(m.set_match_team(5, TeamField::Team1, "Greens"), Err(BracketError::InvalidSlot(5)));
    assert_eq!(m.bracket, before);

    assert_eq!(m.bracket.matches()[4].team1(), "Reds");
    m.reset_bracket();
    assert_eq!(m.bracket.matches()[4].team1(), "");
}

#[test]
fn meetup_serializes_full_bracket() {
    let m = meetup_with_players(2);
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["bracket"]["matches"].as_array().unwrap().len(), 7);
    assert_eq!(json["bracket"]["matches"][6]["winner"], serde_json::Value::Null);
    assert_eq!(json["roster"]["players"].as_array().unwrap().len(), 2);
    assert_eq!(json["group_count"], 2);
}
