use std::collections::BTreeMap;

use crate::model::{Btts, ExtractedScore, GoalLine, OverUnder, ScenarioProbabilities};

// Display heuristics anchored on a single predicted scoreline. The constants
// are part of the output contract; they are not a fitted model.
const WINNER_BASE: f64 = 45.0;
const WINNER_PER_GOAL: f64 = 15.0;
const WINNER_CAP: f64 = 80.0;
const LOSER_BASE: f64 = 20.0;
const LOSER_PER_GOAL: f64 = 5.0;
const LOSER_FLOOR: f64 = 5.0;
const LEVEL_DRAW: f64 = 50.0;
const LEVEL_SIDE: f64 = 25.0;

const LINE_BASE: f64 = 55.0;
const LINE_PER_GOAL: f64 = 15.0;
const LINE_CAP: f64 = 95.0;

const BTTS_LIKELY: u8 = 75;
const BTTS_UNLIKELY: u8 = 25;

/// Derive win/draw/loss, goal-line and BTTS percentages from an extracted
/// score. `None` when no score was extracted.
pub fn compute_scenarios(score: &ExtractedScore) -> Option<ScenarioProbabilities> {
    let (home, away) = score.pair()?;
    Some(scenarios_for(home, away))
}

pub fn scenarios_for(home: u8, away: u8) -> ScenarioProbabilities {
    let (home_win, draw, away_win) = outcome_split(home, away);
    let total_goals = home.saturating_add(away);

    let goals: BTreeMap<GoalLine, OverUnder> = GoalLine::ALL
        .iter()
        .map(|line| (*line, over_under(total_goals, line.value())))
        .collect();

    ScenarioProbabilities {
        home_win,
        draw,
        away_win,
        goals,
        btts: btts(home, away),
        total_goals,
    }
}

fn outcome_split(home: u8, away: u8) -> (u8, u8, u8) {
    if home == away {
        return (
            to_pct(LEVEL_SIDE),
            to_pct(LEVEL_DRAW),
            to_pct(LEVEL_SIDE),
        );
    }
    let (fav, dog) = favourite_split(home.abs_diff(away) as f64);
    let (home_win, away_win) = if home > away {
        (to_pct(fav), to_pct(dog))
    } else {
        (to_pct(dog), to_pct(fav))
    };
    // Draw takes the remainder so the three always add up to 100.
    (home_win, 100 - home_win - away_win, away_win)
}

fn favourite_split(margin: f64) -> (f64, f64) {
    let fav = (WINNER_BASE + margin * WINNER_PER_GOAL).min(WINNER_CAP);
    let dog = (LOSER_BASE - margin * LOSER_PER_GOAL).max(LOSER_FLOOR);
    (fav, dog)
}

fn over_under(total_goals: u8, line: f64) -> OverUnder {
    let total = total_goals as f64;
    if total > line {
        let over = to_pct((LINE_BASE + (total - line) * LINE_PER_GOAL).min(LINE_CAP));
        OverUnder {
            over,
            under: 100 - over,
        }
    } else if total < line {
        let under = to_pct((LINE_BASE + (line - total) * LINE_PER_GOAL).min(LINE_CAP));
        OverUnder {
            over: 100 - under,
            under,
        }
    } else {
        OverUnder {
            over: 50,
            under: 50,
        }
    }
}

fn btts(home: u8, away: u8) -> Btts {
    if home > 0 && away > 0 {
        Btts {
            yes: BTTS_LIKELY,
            no: BTTS_UNLIKELY,
        }
    } else {
        Btts {
            yes: BTTS_UNLIKELY,
            no: BTTS_LIKELY,
        }
    }
}

fn to_pct(v: f64) -> u8 {
    v.round().clamp(0.0, 100.0) as u8
}
