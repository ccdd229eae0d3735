//! Text that flows to and from the commentary generator: the context block
//! built from form data, the prompt wrapped around it, and line classification
//! for stored context blocks.

use serde::Serialize;
use tracing::debug;

use crate::form::{
    AlgorithmicPrediction, FORM_WINDOW, Fixture, PredictedSide, TeamForm, algorithmic_prediction,
    recent_form, team_id_by_name,
};
use crate::model::MatchInsight;

pub fn build_analysis_context(
    home_team: &str,
    away_team: &str,
    home_form: &TeamForm,
    away_form: &TeamForm,
    prediction: &AlgorithmicPrediction,
) -> String {
    let verdict = match prediction.side {
        PredictedSide::Draw => "Draw".to_string(),
        PredictedSide::Home => format!("Winner: {home_team}"),
        PredictedSide::Away => format!("Winner: {away_team}"),
    };
    format!(
        "Match: {home_team} vs {away_team}. \n\
         {home_team} Form (Last {FORM_WINDOW}): {} pts. Details: {}. \n\
         {away_team} Form (Last {FORM_WINDOW}): {} pts. Details: {}. \n\
         Algorithmic Prediction: {verdict} with {}% confidence.",
        home_form.points,
        home_form.form_str,
        away_form.points,
        away_form.form_str,
        prediction.confidence_pct(),
    )
}

/// Form context for one fixture, computed from the fixture history. `None`
/// when either team never appears in it.
pub fn pre_match_context(home_team: &str, away_team: &str, fixtures: &[Fixture]) -> Option<String> {
    let home_id = team_id_by_name(fixtures, home_team)?;
    let away_id = team_id_by_name(fixtures, away_team)?;
    let home_form = recent_form(home_id, fixtures, FORM_WINDOW);
    let away_form = recent_form(away_id, fixtures, FORM_WINDOW);
    let prediction = algorithmic_prediction(&home_form, &away_form);
    Some(build_analysis_context(
        home_team.trim(),
        away_team.trim(),
        &home_form,
        &away_form,
        &prediction,
    ))
}

/// Give every insight without stored context one built from `fixtures`.
/// Returns how many were filled.
pub fn fill_missing_context(insights: &mut [MatchInsight], fixtures: &[Fixture]) -> usize {
    let mut filled = 0;
    for insight in insights.iter_mut().filter(|i| i.analysis_content.is_none()) {
        insight.analysis_content =
            pre_match_context(&insight.home_team, &insight.away_team, fixtures);
        if insight.analysis_content.is_some() {
            filled += 1;
        } else {
            debug!(home = %insight.home_team, away = %insight.away_team, "no fixture history");
        }
    }
    filled
}

/// Prompt for the commentary model. Asks for an exact score so the extractors
/// have something to find.
pub fn build_commentary_prompt(context: &str) -> String {
    format!(
        "You are a professional Premier League football analyst.\n\
         Analyze the following match data and prediction:\n\
         \n\
         {}\n\
         \n\
         Write a match preview that contains the exact score of the match, who will score first and who will get more cards.\n\
         Explain why the predicted winner is favored based on the form.\n\
         End with two lines: \"Predicted Winner: <team or Draw>\" and \"Predicted Score: <home>-<away>\".\n\
         Do not mention 'algorithm' or 'confidence score' explicitly.",
        context.trim()
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AnalysisLine {
    Heading(String),
    Emphasis(String),
    Body(String),
}

/// Split a stored context block into display lines. Separator lines become
/// headings with the rule characters removed.
pub fn classify_analysis_lines(content: Option<&str>) -> Vec<AnalysisLine> {
    let Some(content) = content else {
        return Vec::new();
    };
    content
        .split('\n')
        .map(|line| {
            let line = line.trim_end_matches('\r');
            if line.contains("---") || line.contains("===") {
                let stripped: String = line.chars().filter(|c| *c != '-' && *c != '=').collect();
                AnalysisLine::Heading(stripped.trim().to_string())
            } else if line.starts_with("Match:") || line.starts_with("Prediction:") {
                AnalysisLine::Emphasis(line.to_string())
            } else {
                AnalysisLine::Body(line.to_string())
            }
        })
        .collect()
}
