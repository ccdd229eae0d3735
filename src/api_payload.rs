//! Typed views over the JSON served by the dashboard API.
//!
//! Only parsing lives here; fetching is left to whoever hands us the body.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use tracing::warn;

use crate::form::Fixture;
use crate::model::{MatchRecord, TableRow};

#[derive(Debug, Deserialize)]
struct ApiMatch {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    home_team: Option<String>,
    #[serde(default)]
    away_team: Option<String>,
    #[serde(default)]
    logo_home: Option<String>,
    #[serde(default)]
    logo_away: Option<String>,
    #[serde(default)]
    prediction: Option<ApiPrediction>,
}

#[derive(Debug, Deserialize)]
struct ApiFixture {
    id: u64,
    #[serde(default)]
    date: Option<String>,
    home_team_id: u64,
    away_team_id: u64,
    #[serde(default)]
    home_team: Option<String>,
    #[serde(default)]
    away_team: Option<String>,
    #[serde(default)]
    home_score: Option<u8>,
    #[serde(default)]
    away_score: Option<u8>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPrediction {
    #[serde(default)]
    winner: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    ai_text: Option<String>,
    #[serde(default)]
    analysis_content: Option<String>,
}

/// Parse the fixtures list. `null` or an empty body is an empty list; entries
/// without both team names are dropped.
pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let rows: Vec<ApiMatch> = serde_json::from_str(trimmed).context("invalid matches json")?;
    Ok(rows.into_iter().filter_map(match_record_from_api).collect())
}

/// Parse a single fixture body (`/matches/{id}`).
pub fn parse_match_json(raw: &str) -> Result<Option<MatchRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let row: ApiMatch = serde_json::from_str(trimmed).context("invalid match json")?;
    Ok(match_record_from_api(row))
}

pub fn parse_table_json(raw: &str) -> Result<Vec<TableRow>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid table json")
}

/// Parse the fixture history used for form. Rows without a usable date are
/// dropped; only `FINISHED` rows count as played.
pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let rows: Vec<ApiFixture> = serde_json::from_str(trimmed).context("invalid fixtures json")?;
    Ok(rows.into_iter().filter_map(fixture_from_api).collect())
}

fn fixture_from_api(row: ApiFixture) -> Option<Fixture> {
    let Some(date) = row.date.as_deref().and_then(parse_fixture_date) else {
        warn!(id = row.id, "skipping fixture without a usable date");
        return None;
    };
    let finished = row
        .status
        .as_deref()
        .is_some_and(|s| s.trim().eq_ignore_ascii_case("FINISHED"));
    Some(Fixture {
        id: row.id,
        date,
        home_id: row.home_team_id,
        away_id: row.away_team_id,
        home_name: row.home_team.unwrap_or_default().trim().to_string(),
        away_name: row.away_team.unwrap_or_default().trim().to_string(),
        home_goals: row.home_score,
        away_goals: row.away_score,
        finished,
    })
}

fn match_record_from_api(row: ApiMatch) -> Option<MatchRecord> {
    let home_team = row.home_team.as_deref().and_then(non_empty);
    let away_team = row.away_team.as_deref().and_then(non_empty);
    let (Some(home_team), Some(away_team)) = (home_team, away_team) else {
        warn!(id = ?row.id, "skipping match without team names");
        return None;
    };

    let date = row.date.as_deref().and_then(|raw| {
        let parsed = parse_fixture_date(raw);
        if parsed.is_none() {
            warn!(id = ?row.id, date = raw, "unparseable fixture date");
        }
        parsed
    });

    let mut record = MatchRecord::new(home_team, away_team);
    record.id = row.id;
    record.date = date;
    record.logo_home = row.logo_home.filter(|s| !s.trim().is_empty());
    record.logo_away = row.logo_away.filter(|s| !s.trim().is_empty());
    if let Some(pred) = row.prediction {
        record.upstream_winner = pred.winner.as_deref().and_then(non_empty);
        record.confidence = pred.confidence.map(clamp_confidence);
        record.ai_text = pred.ai_text;
        record.analysis_content = pred.analysis_content;
    }
    Some(record)
}

/// Accepts the naive ISO form the API emits, the space-separated database
/// form, and RFC 3339 with an offset (converted to UTC).
pub fn parse_fixture_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn clamp_confidence(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn fixture_date_forms() {
        let naive = parse_fixture_date("2025-08-16T19:00:00").unwrap();
        assert_eq!((naive.month(), naive.day(), naive.hour()), (8, 16, 19));
        let spaced = parse_fixture_date("2025-08-16 19:00:00").unwrap();
        assert_eq!(spaced, naive);
        let zoned = parse_fixture_date("2025-08-16T21:00:00+02:00").unwrap();
        assert_eq!(zoned, naive);
        assert!(parse_fixture_date("next saturday").is_none());
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(clamp_confidence(140.0), 100);
        assert_eq!(clamp_confidence(-3.0), 0);
        assert_eq!(clamp_confidence(63.6), 64);
        assert_eq!(clamp_confidence(f64::NAN), 0);
    }

    #[test]
    fn null_prediction_leaves_fields_empty() {
        let raw = r#"{"id":5,"date":"2025-09-01T15:00:00","home_team":"Leeds","away_team":"Burnley","prediction":null}"#;
        let record = parse_match_json(raw).unwrap().expect("record present");
        assert_eq!(record.id, Some(5));
        assert!(record.ai_text.is_none());
        assert!(record.upstream_winner.is_none());
    }

    #[test]
    fn fixtures_keep_status_and_drop_undated_rows() {
        let raw = r#"[
            {"id":1,"date":"2025-08-01T15:00:00","home_team_id":8,"away_team_id":7,
             "home_team":"Leeds","away_team":"Burnley","home_score":2,"away_score":0,"status":"FINISHED"},
            {"id":2,"date":null,"home_team_id":7,"away_team_id":8,"status":"FINISHED"},
            {"id":3,"date":"2025-08-17 17:30:00","home_team_id":8,"away_team_id":7,
             "home_team":"Leeds","away_team":"Burnley","status":"TIMED"}
        ]"#;
        let fixtures = parse_fixtures_json(raw).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert!(fixtures[0].finished);
        assert_eq!(fixtures[0].home_goals, Some(2));
        assert!(!fixtures[1].finished);
        assert!(fixtures[1].home_goals.is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_fixtures_json("{}").is_err());
        assert!(parse_matches_json("[{").is_err());
        assert!(parse_table_json("{\"id\":").is_err());
    }
}
