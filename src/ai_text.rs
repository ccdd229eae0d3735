//! Heuristic extraction of a predicted winner and scoreline from free-form
//! analysis text.
//!
//! The upstream text generator follows no fixed format, so every function here
//! degrades to a "not found" value instead of failing.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::model::{DRAW_LABEL, ExtractedScore, ExtractedWinner, ScorePattern};

/// Largest goal count accepted from text. Anything above is treated as noise.
pub const MAX_GOALS: u32 = 10;

static WINNER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)predicted winner:[ \t]*([^\r\n]+)").expect("winner pattern compiles")
});

// Ordered from most to least specific. The first rung yielding an in-range
// pair wins; each rung only looks at its leftmost match.
static SCORE_LADDER: Lazy<Vec<(ScorePattern, Regex)>> = Lazy::new(|| {
    [
        (
            ScorePattern::PredictedScore,
            r"(?i)predicted score:\s*([0-9]+)\s*[-–:]\s*([0-9]+)",
        ),
        (
            ScorePattern::LabeledScore,
            r"(?i)(?:predicted score|final score|\bpredict\w*)\s*:?\s*([0-9]+)\s*[-–:]\s*([0-9]+)",
        ),
        (
            ScorePattern::BareScore,
            r"(?i)\bscore\b\s*:?\s*([0-9]+)\s*[-–:]\s*([0-9]+)",
        ),
        (
            ScorePattern::ResultPhrase,
            r"(?i)\b([0-9]+)\s*[-–]\s*([0-9]+)\s*(?:wins?|victory|to)\b",
        ),
        (
            ScorePattern::ToPhrase,
            r"(?i)\b([0-9]+)\s+to\s+([0-9]+)\b",
        ),
        (ScorePattern::AnyPair, r"([0-9]+)\s*[-–:]\s*([0-9]+)"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("score pattern compiles")))
    .collect()
});

/// Find the first "Predicted Winner:" line. "Draw" and "Tie" collapse to
/// [`DRAW_LABEL`]; anything else is returned trimmed but otherwise verbatim.
pub fn extract_winner(ai_text: Option<&str>) -> ExtractedWinner {
    let Some(text) = ai_text.filter(|t| !t.trim().is_empty()) else {
        return ExtractedWinner::not_found();
    };
    let Some(caps) = WINNER_RE.captures(text) else {
        return ExtractedWinner::not_found();
    };
    let raw = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    if raw.is_empty() {
        return ExtractedWinner::not_found();
    }
    if raw.eq_ignore_ascii_case("draw") || raw.eq_ignore_ascii_case("tie") {
        return ExtractedWinner::found(DRAW_LABEL);
    }
    ExtractedWinner::found(raw)
}

/// Walk the score ladder and return the first in-range `home-away` pair.
pub fn extract_score(ai_text: Option<&str>) -> ExtractedScore {
    let Some(text) = ai_text.filter(|t| !t.trim().is_empty()) else {
        return ExtractedScore::not_found();
    };

    for (kind, re) in SCORE_LADDER.iter() {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        match goals_pair(&caps) {
            Some((home, away)) => {
                debug!(pattern = ?kind, home, away, "score extracted");
                return ExtractedScore::found(home, away, *kind);
            }
            None => {
                trace!(pattern = ?kind, matched = &caps[0], "score out of range");
            }
        }
    }

    ExtractedScore::not_found()
}

fn goals_pair(caps: &Captures<'_>) -> Option<(u8, u8)> {
    let home = parse_goals(caps.get(1)?.as_str())?;
    let away = parse_goals(caps.get(2)?.as_str())?;
    Some((home, away))
}

fn parse_goals(raw: &str) -> Option<u8> {
    // Overflowing digit runs fail to parse, which is the same as out of range.
    let n = raw.parse::<u32>().ok()?;
    if n > MAX_GOALS {
        return None;
    }
    u8::try_from(n).ok()
}
