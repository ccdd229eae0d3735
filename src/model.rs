use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DRAW_LABEL: &str = "Draw";
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One fixture as served by the matches endpoint, flattened so the engine only
/// sees plain fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Option<u64>,
    pub home_team: String,
    pub away_team: String,
    pub date: Option<NaiveDateTime>,
    pub logo_home: Option<String>,
    pub logo_away: Option<String>,
    pub ai_text: Option<String>,
    // 0..=100, already clamped by the payload parser.
    pub confidence: Option<u8>,
    // Winner label computed upstream (team name or "Draw").
    pub upstream_winner: Option<String>,
    pub analysis_content: Option<String>,
}

impl MatchRecord {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            id: None,
            home_team: home_team.into(),
            away_team: away_team.into(),
            date: None,
            logo_home: None,
            logo_away: None,
            ai_text: None,
            confidence: None,
            upstream_winner: None,
            analysis_content: None,
        }
    }

    pub fn with_ai_text(mut self, text: impl Into<String>) -> Self {
        self.ai_text = Some(text.into());
        self
    }

    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = Some(confidence.min(100));
        self
    }

    pub fn with_upstream_winner(mut self, winner: impl Into<String>) -> Self {
        self.upstream_winner = Some(winner.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn has_ai_text(&self) -> bool {
        self.ai_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedWinner {
    pub winner: Option<String>,
    pub found: bool,
}

impl ExtractedWinner {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn found(winner: impl Into<String>) -> Self {
        Self {
            winner: Some(winner.into()),
            found: true,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.found && self.winner.as_deref() == Some(DRAW_LABEL)
    }
}

/// Which rung of the score ladder produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePattern {
    PredictedScore,
    LabeledScore,
    BareScore,
    ResultPhrase,
    ToPhrase,
    AnyPair,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedScore {
    pub home: Option<u8>,
    pub away: Option<u8>,
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<ScorePattern>,
}

impl ExtractedScore {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn found(home: u8, away: u8, pattern: ScorePattern) -> Self {
        Self {
            home: Some(home),
            away: Some(away),
            found: true,
            pattern: Some(pattern),
        }
    }

    pub fn pair(&self) -> Option<(u8, u8)> {
        if !self.found {
            return None;
        }
        Some((self.home?, self.away?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GoalLine {
    #[serde(rename = "0.5")]
    Half,
    #[serde(rename = "1.5")]
    OneHalf,
    #[serde(rename = "2.0")]
    Two,
    #[serde(rename = "2.5")]
    TwoHalf,
    #[serde(rename = "3.0")]
    Three,
}

impl GoalLine {
    pub const ALL: [GoalLine; 5] = [
        GoalLine::Half,
        GoalLine::OneHalf,
        GoalLine::Two,
        GoalLine::TwoHalf,
        GoalLine::Three,
    ];

    pub fn value(self) -> f64 {
        match self {
            GoalLine::Half => 0.5,
            GoalLine::OneHalf => 1.5,
            GoalLine::Two => 2.0,
            GoalLine::TwoHalf => 2.5,
            GoalLine::Three => 3.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GoalLine::Half => "0.5",
            GoalLine::OneHalf => "1.5",
            GoalLine::Two => "2.0",
            GoalLine::TwoHalf => "2.5",
            GoalLine::Three => "3.0",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverUnder {
    pub over: u8,
    pub under: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Btts {
    pub yes: u8,
    pub no: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioProbabilities {
    pub home_win: u8,
    pub draw: u8,
    pub away_win: u8,
    pub goals: BTreeMap<GoalLine, OverUnder>,
    pub btts: Btts,
    pub total_goals: u8,
}

impl ScenarioProbabilities {
    pub fn goal_line(&self, line: GoalLine) -> Option<OverUnder> {
        self.goals.get(&line).copied()
    }
}

/// Everything derived for one match in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInsight {
    pub id: Option<u64>,
    pub home_team: String,
    pub away_team: String,
    pub date: Option<NaiveDateTime>,
    pub winner: ExtractedWinner,
    pub score: ExtractedScore,
    pub scenarios: Option<ScenarioProbabilities>,
    pub outcome_label: String,
    pub confidence: Option<u8>,
    // Stored form/statistics block; filled from fixtures when upstream sent none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_content: Option<String>,
}

/// Row of the league table endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub matches_played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub draws: u32,
    #[serde(default)]
    pub loses: u32,
    #[serde(default)]
    pub goals_scored: u32,
    #[serde(default)]
    pub goals_conceded: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub xg_for: Option<f64>,
    #[serde(default)]
    pub xg_against: Option<f64>,
}

impl TableRow {
    pub fn goal_difference(&self) -> i64 {
        self.goals_scored as i64 - self.goals_conceded as i64
    }
}
