use crate::model::{DRAW_LABEL, ExtractedScore, ExtractedWinner, UNKNOWN_LABEL};

/// Pick the single winner label shown for a match.
///
/// An explicit "Predicted Winner:" line beats a winner inferred from the
/// extracted scoreline, which beats whatever label the upstream service
/// attached to the fixture.
pub fn resolve_outcome_label(
    winner: &ExtractedWinner,
    score: &ExtractedScore,
    home_team: &str,
    away_team: &str,
    upstream: Option<&str>,
) -> String {
    if winner.found {
        if let Some(name) = winner.winner.as_deref() {
            return if name == DRAW_LABEL {
                DRAW_LABEL.to_string()
            } else {
                win_label(name)
            };
        }
    }

    if let Some((home, away)) = score.pair() {
        return if home > away {
            win_label(home_team)
        } else if away > home {
            win_label(away_team)
        } else {
            DRAW_LABEL.to_string()
        };
    }

    upstream
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

fn win_label(team: &str) -> String {
    format!("{} Win", team.trim())
}
