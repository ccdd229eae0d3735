use std::cmp::Ordering;

use serde::Serialize;

use crate::model::TableRow;

const TOP_ZONE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StandingZone {
    Top,
    Mid,
    Relegation,
}

#[derive(Debug, Clone, Serialize)]
pub struct Standing {
    pub position: usize,
    pub zone: StandingZone,
    pub badge: String,
    pub goal_difference: i64,
    pub row: TableRow,
}

impl Standing {
    pub fn goal_difference_label(&self) -> String {
        if self.goal_difference > 0 {
            format!("+{}", self.goal_difference)
        } else {
            self.goal_difference.to_string()
        }
    }

    pub fn goals_label(&self) -> String {
        format!("{}:{}", self.row.goals_scored, self.row.goals_conceded)
    }

    /// Expected goals for and against, when the table carries them.
    pub fn xg_label(&self) -> Option<String> {
        match (self.row.xg_for, self.row.xg_against) {
            (Some(xg_for), Some(xg_against)) => Some(format!("{xg_for:.1}:{xg_against:.1}")),
            (Some(xg_for), None) => Some(format!("{xg_for:.1}:-")),
            (None, Some(xg_against)) => Some(format!("-:{xg_against:.1}")),
            (None, None) => None,
        }
    }
}

/// Order by points, then goal difference, then goals scored; name breaks any
/// remaining tie so the output is stable.
pub fn rank_table(rows: &[TableRow]) -> Vec<Standing> {
    let mut sorted: Vec<TableRow> = rows.to_vec();
    sorted.sort_by(compare_rows);

    let len = sorted.len();
    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let position = idx + 1;
            Standing {
                position,
                zone: zone_for(position, len),
                badge: badge_for(&row),
                goal_difference: row.goal_difference(),
                row,
            }
        })
        .collect()
}

fn compare_rows(a: &TableRow, b: &TableRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_scored.cmp(&a.goals_scored))
        .then_with(|| a.name.cmp(&b.name))
}

pub fn zone_for(position: usize, table_len: usize) -> StandingZone {
    if position <= TOP_ZONE {
        StandingZone::Top
    } else if position >= table_len.saturating_sub(2) {
        StandingZone::Relegation
    } else {
        StandingZone::Mid
    }
}

fn badge_for(row: &TableRow) -> String {
    let source = row
        .short_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(row.name.trim());
    source.chars().take(2).collect()
}
