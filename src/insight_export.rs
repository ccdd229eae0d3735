use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use crate::model::{GoalLine, MatchInsight};
use crate::standings::Standing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    pub insights: usize,
    pub goal_lines: usize,
    pub table_rows: usize,
}

pub fn export_insights(
    path: &Path,
    insights: &[MatchInsight],
    table: Option<&[Standing]>,
) -> Result<ExportReport> {
    let insight_rows = insight_rows(insights);
    let line_rows = goal_line_rows(insights);
    let table_rows = table.map(standing_rows);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Insights")?;
        write_rows(sheet, &insight_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("GoalLines")?;
        write_rows(sheet, &line_rows)?;
    }
    if let Some(rows) = table_rows.as_ref() {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Table")?;
        write_rows(sheet, rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    let report = ExportReport {
        insights: insight_rows.len().saturating_sub(1),
        goal_lines: line_rows.len().saturating_sub(1),
        table_rows: table_rows
            .as_ref()
            .map(|rows| rows.len().saturating_sub(1))
            .unwrap_or(0),
    };
    info!(
        path = %path.display(),
        insights = report.insights,
        goal_lines = report.goal_lines,
        table_rows = report.table_rows,
        "workbook written"
    );
    Ok(report)
}

pub fn insight_rows(insights: &[MatchInsight]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Match ID".to_string(),
        "Date".to_string(),
        "Home".to_string(),
        "Away".to_string(),
        "Outcome".to_string(),
        "Confidence".to_string(),
        "Predicted Winner".to_string(),
        "Home Goals".to_string(),
        "Away Goals".to_string(),
        "Score Source".to_string(),
        "Home Win %".to_string(),
        "Draw %".to_string(),
        "Away Win %".to_string(),
        "BTTS Yes %".to_string(),
        "BTTS No %".to_string(),
        "Analysis".to_string(),
    ]];
    rows.extend(insights.iter().map(insight_row));
    rows
}

fn insight_row(insight: &MatchInsight) -> Vec<String> {
    let scenarios = insight.scenarios.as_ref();
    vec![
        opt_to_string(insight.id),
        insight
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
        insight.home_team.clone(),
        insight.away_team.clone(),
        insight.outcome_label.clone(),
        opt_to_string(insight.confidence),
        insight.winner.winner.clone().unwrap_or_default(),
        opt_to_string(insight.score.home),
        opt_to_string(insight.score.away),
        insight
            .score
            .pattern
            .map(|p| format!("{p:?}"))
            .unwrap_or_default(),
        opt_to_string(scenarios.map(|s| s.home_win)),
        opt_to_string(scenarios.map(|s| s.draw)),
        opt_to_string(scenarios.map(|s| s.away_win)),
        opt_to_string(scenarios.map(|s| s.btts.yes)),
        opt_to_string(scenarios.map(|s| s.btts.no)),
        insight
            .analysis_content
            .as_deref()
            .map(flatten_analysis)
            .unwrap_or_default(),
    ]
}

pub fn goal_line_rows(insights: &[MatchInsight]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Match ID".to_string(),
        "Home".to_string(),
        "Away".to_string(),
        "Total Goals".to_string(),
        "Line".to_string(),
        "Over %".to_string(),
        "Under %".to_string(),
    ]];
    for insight in insights {
        let Some(scenarios) = insight.scenarios.as_ref() else {
            continue;
        };
        for line in GoalLine::ALL {
            let Some(ou) = scenarios.goal_line(line) else {
                continue;
            };
            rows.push(vec![
                opt_to_string(insight.id),
                insight.home_team.clone(),
                insight.away_team.clone(),
                scenarios.total_goals.to_string(),
                line.label().to_string(),
                ou.over.to_string(),
                ou.under.to_string(),
            ]);
        }
    }
    rows
}

fn standing_rows(table: &[Standing]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Pos".to_string(),
        "Team".to_string(),
        "M".to_string(),
        "W".to_string(),
        "D".to_string(),
        "L".to_string(),
        "Goals".to_string(),
        "GD".to_string(),
        "Pts".to_string(),
        "Zone".to_string(),
        "xG".to_string(),
    ]];
    rows.extend(table.iter().map(|s| {
        vec![
            s.position.to_string(),
            s.row.name.clone(),
            s.row.matches_played.to_string(),
            s.row.wins.to_string(),
            s.row.draws.to_string(),
            s.row.loses.to_string(),
            s.goals_label(),
            s.goal_difference_label(),
            s.row.points.to_string(),
            format!("{:?}", s.zone),
            s.xg_label().unwrap_or_default(),
        ]
    }));
    rows
}

// One cell per match: trimmed lines joined, blank lines dropped.
fn flatten_analysis(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
