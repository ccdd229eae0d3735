use std::fs;
use std::path::PathBuf;

use matchday_insight::api_payload::parse_matches_json;
use matchday_insight::batch::analyze_all;
use matchday_insight::insight::{analyze_match, summarize};
use matchday_insight::model::{GoalLine, MatchInsight, OverUnder, ScorePattern};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_insights() -> Vec<MatchInsight> {
    let records = parse_matches_json(&read_fixture("matches.json")).expect("fixture should parse");
    analyze_all(&records, 2)
}

fn by_id(insights: &[MatchInsight], id: u64) -> &MatchInsight {
    insights
        .iter()
        .find(|i| i.id == Some(id))
        .expect("insight for id")
}

#[test]
fn structured_commentary() {
    let insights = fixture_insights();
    let arsenal = by_id(&insights, 101);
    assert_eq!(arsenal.outcome_label, "Arsenal Win");
    assert_eq!(arsenal.score.pair(), Some((3, 1)));
    assert_eq!(arsenal.score.pattern, Some(ScorePattern::PredictedScore));
    let s = arsenal.scenarios.as_ref().expect("score found");
    assert_eq!((s.home_win, s.draw, s.away_win), (75, 15, 10));
    assert_eq!(s.total_goals, 4);
    assert_eq!(s.goal_line(GoalLine::Three), Some(OverUnder { over: 70, under: 30 }));
    assert_eq!(s.btts.yes, 75);
    assert_eq!(arsenal.confidence, Some(73));
}

#[test]
fn tie_line_and_final_score_fallback() {
    let insights = fixture_insights();
    let everton = by_id(&insights, 102);
    assert!(everton.winner.is_draw());
    assert_eq!(everton.outcome_label, "Draw");
    assert_eq!(everton.score.pattern, Some(ScorePattern::LabeledScore));
    let s = everton.scenarios.as_ref().expect("score found");
    assert_eq!((s.home_win, s.draw, s.away_win), (25, 50, 25));
}

#[test]
fn result_phrase_infers_away_win() {
    let insights = fixture_insights();
    let fulham = by_id(&insights, 103);
    assert!(!fulham.winner.found);
    assert_eq!(fulham.score.pair(), Some((0, 2)));
    assert_eq!(fulham.outcome_label, "Newcastle Win");
    let s = fulham.scenarios.as_ref().expect("score found");
    assert_eq!((s.home_win, s.draw, s.away_win), (10, 15, 75));
    assert_eq!(s.btts.no, 75);
}

#[test]
fn missing_text_falls_back() {
    let insights = fixture_insights();
    let leeds = by_id(&insights, 104);
    assert_eq!(leeds.outcome_label, "Leeds");
    assert!(leeds.scenarios.is_none());
    assert!(leeds.confidence.is_none());

    let chelsea = by_id(&insights, 105);
    assert_eq!(chelsea.outcome_label, "Unknown");
}

#[test]
fn absurd_score_is_ignored() {
    let insights = fixture_insights();
    let brentford = by_id(&insights, 107);
    assert!(!brentford.score.found);
    assert!(brentford.scenarios.is_none());
    assert_eq!(brentford.outcome_label, "Villa");
}

#[test]
fn summary_over_fixture() {
    let records = parse_matches_json(&read_fixture("matches.json")).expect("fixture should parse");
    let insights = analyze_all(&records, 3);
    let summary = summarize(&records, &insights);
    assert_eq!(summary.matches, 6);
    assert_eq!(summary.with_ai_text, 4);
    assert_eq!(summary.with_winner, 2);
    assert_eq!(summary.with_score, 3);
    assert_eq!(summary.draws, 1);
}

#[test]
fn analysis_is_repeatable() {
    let records = parse_matches_json(&read_fixture("matches.json")).expect("fixture should parse");
    for record in &records {
        assert_eq!(analyze_match(record), analyze_match(record));
    }
}

#[test]
fn insights_serialize_goal_lines_by_label() {
    let insights = fixture_insights();
    let json = serde_json::to_value(by_id(&insights, 101)).expect("insight serializes");
    let over = json["scenarios"]["goals"]["2.5"]["over"].as_u64();
    // Total 4 against 2.5: 55 + 1.5 * 15 = 77.5, rounded up.
    assert_eq!(over, Some(78));
    assert!(json["scenarios"]["goals"]["0.5"].is_object());
}
