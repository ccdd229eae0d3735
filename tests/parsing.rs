use std::fs;
use std::path::PathBuf;

use matchday_insight::api_payload::{parse_match_json, parse_matches_json, parse_table_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_matches_fixture() {
    let raw = read_fixture("matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    // The entry with a blank home team is dropped.
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].id, Some(101));
    assert_eq!(rows[0].home_team, "Arsenal");
    assert_eq!(rows[0].confidence, Some(73));
    assert_eq!(rows[0].upstream_winner.as_deref(), Some("Arsenal"));
    assert!(rows[0].logo_home.is_some());
    assert!(rows[0].logo_away.is_none());
    assert!(rows[0].date.is_some());
}

#[test]
fn null_prediction_and_null_text() {
    let raw = read_fixture("matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    let leeds = rows.iter().find(|r| r.id == Some(104)).unwrap();
    assert!(leeds.ai_text.is_none());
    assert_eq!(leeds.confidence, Some(0));
    let chelsea = rows.iter().find(|r| r.id == Some(105)).unwrap();
    assert!(chelsea.upstream_winner.is_none());
    assert!(chelsea.confidence.is_none());
}

#[test]
fn fractional_confidence_is_rounded() {
    let raw = read_fixture("matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    let villa = rows.iter().find(|r| r.id == Some(107)).unwrap();
    assert_eq!(villa.confidence, Some(55));
}

#[test]
fn single_match_body() {
    let raw = r#"{"id": 9, "home_team": "Spurs", "away_team": "Palace", "date": "2025-10-04 12:30:00"}"#;
    let record = parse_match_json(raw)
        .expect("body should parse")
        .expect("record present");
    assert_eq!(record.home_team, "Spurs");
    assert!(record.date.is_some());
    assert!(parse_match_json("null").expect("null should parse").is_none());
}

#[test]
fn parses_table_fixture() {
    let raw = read_fixture("table.json");
    let rows = parse_table_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 8);
    let everton = rows.iter().find(|r| r.name == "Everton").unwrap();
    assert!(everton.short_name.is_none());
    let leeds = rows.iter().find(|r| r.name == "Leeds").unwrap();
    assert_eq!(leeds.xg_for, Some(3.4));
}

#[test]
fn null_bodies_are_empty() {
    assert!(parse_matches_json("null").expect("null should parse").is_empty());
    assert!(parse_matches_json("  ").expect("blank should parse").is_empty());
    assert!(parse_table_json("null").expect("null should parse").is_empty());
}
