use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use matchday_insight::ai_text::{extract_score, extract_winner};
use matchday_insight::insight::analyze_match;
use matchday_insight::logging::init_tracing;
use matchday_insight::model::{GoalLine, MatchRecord};

#[derive(Debug, serde::Deserialize)]
struct TextCase {
    #[serde(default)]
    home_team: Option<String>,
    #[serde(default)]
    away_team: Option<String>,
    #[serde(default)]
    ai_text: Option<String>,
    #[serde(default)]
    confidence: Option<u8>,
    #[serde(default)]
    winner: Option<String>,
}

fn load_case(path: &Path) -> anyhow::Result<TextCase> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid case json in {}", path.display()))
}

// Loads one case (or raw text via `--text`) and prints what each extractor saw.
// No network; meant for checking new commentary phrasings by hand.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let case = match args.next().as_deref() {
        Some("--text") => TextCase {
            home_team: None,
            away_team: None,
            ai_text: Some(args.collect::<Vec<_>>().join(" ")),
            confidence: None,
            winner: None,
        },
        other => {
            let path = other
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("tests/fixtures/probe_case.json"));
            load_case(&path)?
        }
    };

    let mut record = MatchRecord::new(
        case.home_team.unwrap_or_else(|| "Home".to_string()),
        case.away_team.unwrap_or_else(|| "Away".to_string()),
    );
    record.ai_text = case.ai_text;
    record.confidence = case.confidence.map(|c| c.min(100));
    record.upstream_winner = case.winner;

    let text = record.ai_text.as_deref();
    let winner = extract_winner(text);
    let score = extract_score(text);
    println!("Winner line: {:?} (found: {})", winner.winner, winner.found);
    println!(
        "Score: {:?}-{:?} (found: {}, via {:?})",
        score.home, score.away, score.found, score.pattern
    );

    let insight = analyze_match(&record);
    println!("Outcome: {}", insight.outcome_label);
    match insight.scenarios {
        Some(s) => {
            println!("Home: {}%", s.home_win);
            println!("Draw: {}%", s.draw);
            println!("Away: {}%", s.away_win);
            for line in GoalLine::ALL {
                if let Some(ou) = s.goal_line(line) {
                    println!("O/U {}: {}% / {}%", line.label(), ou.over, ou.under);
                }
            }
            println!("BTTS: {}% / {}%", s.btts.yes, s.btts.no);
        }
        None => println!("Scenarios: unavailable (no score in text)"),
    }

    Ok(())
}
