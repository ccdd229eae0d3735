use serde::Serialize;

use crate::ai_text::{extract_score, extract_winner};
use crate::model::{DRAW_LABEL, MatchInsight, MatchRecord};
use crate::outcome::resolve_outcome_label;
use crate::scenario_prob::compute_scenarios;

/// Run every extractor over one record. Pure: the same record always yields
/// the same insight.
pub fn analyze_match(record: &MatchRecord) -> MatchInsight {
    let text = record.ai_text.as_deref();
    let winner = extract_winner(text);
    let score = extract_score(text);
    let scenarios = compute_scenarios(&score);
    let outcome_label = resolve_outcome_label(
        &winner,
        &score,
        &record.home_team,
        &record.away_team,
        record.upstream_winner.as_deref(),
    );

    MatchInsight {
        id: record.id,
        home_team: record.home_team.clone(),
        away_team: record.away_team.clone(),
        date: record.date,
        winner,
        score,
        scenarios,
        outcome_label,
        confidence: record.confidence.filter(|c| *c > 0),
        analysis_content: record
            .analysis_content
            .clone()
            .filter(|content| !content.trim().is_empty()),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InsightSummary {
    pub matches: usize,
    pub with_ai_text: usize,
    pub with_winner: usize,
    pub with_score: usize,
    pub draws: usize,
}

pub fn summarize(records: &[MatchRecord], insights: &[MatchInsight]) -> InsightSummary {
    InsightSummary {
        matches: insights.len(),
        with_ai_text: records.iter().filter(|r| r.has_ai_text()).count(),
        with_winner: insights.iter().filter(|i| i.winner.found).count(),
        with_score: insights.iter().filter(|i| i.score.found).count(),
        draws: insights
            .iter()
            .filter(|i| i.outcome_label == DRAW_LABEL)
            .count(),
    }
}
