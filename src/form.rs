use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const FORM_WINDOW: usize = 5;

const WIN_POINTS: u32 = 3;
const DRAW_POINTS: u32 = 1;
const NEUTRAL_CONFIDENCE: f64 = 0.5;
const POINTS_PER_CONFIDENCE: f64 = 30.0;
const MAX_CONFIDENCE: f64 = 0.95;

/// A finished (or scheduled) fixture as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: u64,
    pub date: NaiveDateTime,
    pub home_id: u64,
    pub away_id: u64,
    pub home_name: String,
    pub away_name: String,
    pub home_goals: Option<u8>,
    pub away_goals: Option<u8>,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormResult {
    Win,
    Draw,
    Loss,
}

impl FormResult {
    pub fn letter(self) -> char {
        match self {
            FormResult::Win => 'W',
            FormResult::Draw => 'D',
            FormResult::Loss => 'L',
        }
    }

    fn points(self) -> u32 {
        match self {
            FormResult::Win => WIN_POINTS,
            FormResult::Draw => DRAW_POINTS,
            FormResult::Loss => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamForm {
    pub team_id: u64,
    pub points: u32,
    pub results: Vec<FormResult>,
    pub form_str: String,
    // Fixtures looked at, including ones skipped for missing scores.
    pub matches_played: usize,
}

/// Points and a readable summary over the team's last `limit` finished
/// fixtures, newest first.
pub fn recent_form(team_id: u64, fixtures: &[Fixture], limit: usize) -> TeamForm {
    let mut played: Vec<&Fixture> = fixtures
        .iter()
        .filter(|f| f.finished)
        .filter(|f| f.home_id == team_id || f.away_id == team_id)
        .collect();
    played.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    played.truncate(limit);

    let mut points = 0;
    let mut results = Vec::with_capacity(played.len());
    let mut summary = Vec::with_capacity(played.len());

    for f in &played {
        let (Some(hg), Some(ag)) = (f.home_goals, f.away_goals) else {
            continue;
        };
        let is_home = f.home_id == team_id;
        let (ours, theirs) = if is_home { (hg, ag) } else { (ag, hg) };
        let result = if ours > theirs {
            FormResult::Win
        } else if ours < theirs {
            FormResult::Loss
        } else {
            FormResult::Draw
        };
        points += result.points();
        results.push(result);

        let opponent = if is_home { &f.away_name } else { &f.home_name };
        summary.push(format!("{} vs {} ({}-{})", result.letter(), opponent, hg, ag));
    }

    TeamForm {
        team_id,
        points,
        results,
        form_str: summary.join(", "),
        matches_played: played.len(),
    }
}

/// Resolve a display name to a team id using the fixture history.
pub fn team_id_by_name(fixtures: &[Fixture], name: &str) -> Option<u64> {
    let name = name.trim();
    fixtures.iter().find_map(|f| {
        if f.home_name.eq_ignore_ascii_case(name) {
            Some(f.home_id)
        } else if f.away_name.eq_ignore_ascii_case(name) {
            Some(f.away_id)
        } else {
            None
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictedSide {
    Home,
    Away,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlgorithmicPrediction {
    pub side: PredictedSide,
    // 0.5..=0.95
    pub confidence: f64,
}

impl AlgorithmicPrediction {
    pub fn confidence_pct(&self) -> u8 {
        // Epsilon keeps 0.8 * 100 from flooring to 79.
        (self.confidence * 100.0 + 1e-9).floor().clamp(0.0, 100.0) as u8
    }

    pub fn is_draw(&self) -> bool {
        self.side == PredictedSide::Draw
    }
}

/// Form-points heuristic used before any text analysis exists: the side with
/// more points wins with confidence growing by 1/30 per point of difference.
pub fn algorithmic_prediction(home: &TeamForm, away: &TeamForm) -> AlgorithmicPrediction {
    if home.points + away.points == 0 {
        return AlgorithmicPrediction {
            side: PredictedSide::Draw,
            confidence: NEUTRAL_CONFIDENCE,
        };
    }

    let (side, diff) = if home.points > away.points {
        (PredictedSide::Home, home.points - away.points)
    } else if away.points > home.points {
        (PredictedSide::Away, away.points - home.points)
    } else {
        (PredictedSide::Draw, 0)
    };

    let confidence = NEUTRAL_CONFIDENCE + diff as f64 / POINTS_PER_CONFIDENCE;
    AlgorithmicPrediction {
        side,
        confidence: confidence.min(MAX_CONFIDENCE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture(id: u64, day: u32, home: (u64, &str, Option<u8>), away: (u64, &str, Option<u8>)) -> Fixture {
        Fixture {
            id,
            date: NaiveDate::from_ymd_opt(2025, 1, day)
                .and_then(|d| d.and_hms_opt(15, 0, 0))
                .unwrap(),
            home_id: home.0,
            away_id: away.0,
            home_name: home.1.to_string(),
            away_name: away.1.to_string(),
            home_goals: home.2,
            away_goals: away.2,
            finished: home.2.is_some(),
        }
    }

    #[test]
    fn form_counts_points_newest_first() {
        let fixtures = vec![
            fixture(1, 1, (1, "Reds", Some(2)), (2, "Blues", Some(0))),
            fixture(2, 8, (3, "Whites", Some(1)), (1, "Reds", Some(1))),
            fixture(3, 15, (1, "Reds", Some(0)), (4, "Greens", Some(3))),
            fixture(4, 22, (1, "Reds", None), (5, "Blacks", None)),
        ];
        let form = recent_form(1, &fixtures, FORM_WINDOW);
        assert_eq!(form.points, 4);
        assert_eq!(
            form.results,
            vec![FormResult::Loss, FormResult::Draw, FormResult::Win]
        );
        assert_eq!(
            form.form_str,
            "L vs Greens (0-3), D vs Whites (1-1), W vs Blues (2-0)"
        );
        assert_eq!(form.matches_played, 3);
    }

    #[test]
    fn form_window_is_respected() {
        let fixtures: Vec<Fixture> = (1..=8)
            .map(|d| fixture(d as u64, d, (1, "Reds", Some(1)), (2, "Blues", Some(0))))
            .collect();
        let form = recent_form(1, &fixtures, FORM_WINDOW);
        assert_eq!(form.results.len(), 5);
        assert_eq!(form.points, 15);
        let blues = recent_form(2, &fixtures, FORM_WINDOW);
        assert_eq!(blues.points, 0);
    }

    #[test]
    fn team_ids_resolve_from_either_side() {
        let fixtures = vec![fixture(1, 1, (1, "Reds", Some(2)), (2, "Blues", Some(0)))];
        assert_eq!(team_id_by_name(&fixtures, "reds"), Some(1));
        assert_eq!(team_id_by_name(&fixtures, " Blues "), Some(2));
        assert_eq!(team_id_by_name(&fixtures, "Greens"), None);
    }

    fn form_with(points: u32) -> TeamForm {
        TeamForm {
            team_id: 0,
            points,
            results: Vec::new(),
            form_str: String::new(),
            matches_played: 5,
        }
    }

    #[test]
    fn prediction_without_points_is_neutral_draw() {
        let p = algorithmic_prediction(&form_with(0), &form_with(0));
        assert!(p.is_draw());
        assert_eq!(p.confidence_pct(), 50);
    }

    #[test]
    fn prediction_scales_with_difference_and_caps() {
        let p = algorithmic_prediction(&form_with(12), &form_with(3));
        assert_eq!(p.side, PredictedSide::Home);
        assert_eq!(p.confidence_pct(), 80);

        let away = algorithmic_prediction(&form_with(0), &form_with(15));
        assert_eq!(away.side, PredictedSide::Away);
        assert!((away.confidence - 0.95).abs() < 1e-9);

        let level = algorithmic_prediction(&form_with(7), &form_with(7));
        assert!(level.is_draw());
    }
}
