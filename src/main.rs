use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use matchday_insight::analysis_text::{
    AnalysisLine, build_commentary_prompt, classify_analysis_lines, fill_missing_context,
};
use matchday_insight::api_payload::{parse_fixtures_json, parse_matches_json, parse_table_json};
use matchday_insight::batch::analyze_all;
use matchday_insight::config::InsightConfig;
use matchday_insight::insight::summarize;
use matchday_insight::insight_export::export_insights;
use matchday_insight::logging::init_tracing;
use matchday_insight::model::{GoalLine, MatchInsight, MatchRecord};
use matchday_insight::standings::{Standing, StandingZone, rank_table};

#[derive(Debug, Default)]
struct CliArgs {
    matches_file: Option<PathBuf>,
    table_file: Option<PathBuf>,
    fixtures_file: Option<PathBuf>,
    export_path: Option<PathBuf>,
    json: bool,
    prompts: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => out.json = true,
            "--prompts" => out.prompts = true,
            "--export" => {
                let Some(path) = args.next() else {
                    bail!("--export needs a path");
                };
                out.export_path = Some(PathBuf::from(path));
            }
            "--table" => {
                let Some(path) = args.next() else {
                    bail!("--table needs a path");
                };
                out.table_file = Some(PathBuf::from(path));
            }
            "--fixtures" => {
                let Some(path) = args.next() else {
                    bail!("--fixtures needs a path");
                };
                out.fixtures_file = Some(PathBuf::from(path));
            }
            other if other.starts_with("--") => bail!("unknown flag {other}"),
            other => out.matches_file = Some(PathBuf::from(other)),
        }
    }
    Ok(out)
}

fn main() -> Result<()> {
    let cfg = InsightConfig::load();
    init_tracing();

    let args = parse_args(std::env::args().skip(1))?;
    let matches_path = args.matches_file.unwrap_or(cfg.matches_file);
    let table_path = args.table_file.or(cfg.table_file);
    let fixtures_path = args.fixtures_file.or(cfg.fixtures_file);
    let export_path = args.export_path.or(cfg.export_path);

    let raw = fs::read_to_string(&matches_path)
        .with_context(|| format!("failed reading {}", matches_path.display()))?;
    let records = parse_matches_json(&raw)?;
    let mut insights = analyze_all(&records, cfg.parallelism);
    if let Some(path) = fixtures_path {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        let fixtures = parse_fixtures_json(&raw)?;
        let filled = fill_missing_context(&mut insights, &fixtures);
        info!(fixtures = fixtures.len(), filled, "form context built");
    }
    let summary = summarize(&records, &insights);
    info!(
        matches = summary.matches,
        with_ai_text = summary.with_ai_text,
        with_score = summary.with_score,
        with_winner = summary.with_winner,
        "matches analysed"
    );

    let table = match table_path {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed reading {}", path.display()))?;
            Some(rank_table(&parse_table_json(&raw)?))
        }
        None => None,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&insights).context("serialize insights")?;
        println!("{json}");
    } else {
        for insight in &insights {
            print_insight(insight);
        }
        if args.prompts {
            print_prompts(&records, &insights);
        }
        if let Some(table) = table.as_deref() {
            print_table(table);
        }
    }

    if let Some(path) = export_path {
        let report = export_insights(&path, &insights, table.as_deref())?;
        eprintln!(
            "exported {} matches, {} goal lines to {}",
            report.insights,
            report.goal_lines,
            path.display()
        );
    }

    Ok(())
}

fn print_insight(insight: &MatchInsight) {
    let date = insight
        .date
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "TBD".to_string());
    println!("{} vs {}  [{}]", insight.home_team, insight.away_team, date);
    match insight.confidence {
        Some(c) => println!("  Prediction: {} ({c}% confidence)", insight.outcome_label),
        None => println!("  Prediction: {}", insight.outcome_label),
    }

    let Some(s) = insight.scenarios.as_ref() else {
        println!("  Scenarios: unavailable");
        print_analysis(insight);
        println!();
        return;
    };
    if let Some((home, away)) = insight.score.pair() {
        println!("  Predicted score: {home}-{away}");
    }
    println!(
        "  1X2: home {}% / draw {}% / away {}%",
        s.home_win, s.draw, s.away_win
    );
    let lines: Vec<String> = GoalLine::ALL
        .iter()
        .filter_map(|line| {
            s.goal_line(*line)
                .map(|ou| format!("{} o{}/u{}", line.label(), ou.over, ou.under))
        })
        .collect();
    println!("  Goals ({} total): {}", s.total_goals, lines.join("  "));
    println!("  BTTS: yes {}% / no {}%", s.btts.yes, s.btts.no);
    print_analysis(insight);
    println!();
}

fn print_analysis(insight: &MatchInsight) {
    let lines = classify_analysis_lines(insight.analysis_content.as_deref());
    if lines.is_empty() {
        return;
    }
    println!("  Statistics:");
    for line in lines {
        match line {
            AnalysisLine::Heading(text) if !text.is_empty() => println!("    [{text}]"),
            AnalysisLine::Emphasis(text) => println!("    > {}", text.trim_end()),
            AnalysisLine::Body(text) if !text.trim().is_empty() => {
                println!("    {}", text.trim_end())
            }
            _ => {}
        }
    }
}

// Matches with form context but no commentary yet get the prompt that would
// be sent to the text generator.
fn print_prompts(records: &[MatchRecord], insights: &[MatchInsight]) {
    for (record, insight) in records.iter().zip(insights) {
        if record.has_ai_text() {
            continue;
        }
        let Some(context) = insight.analysis_content.as_deref() else {
            continue;
        };
        println!("--- prompt: {} vs {} ---", insight.home_team, insight.away_team);
        println!("{}", build_commentary_prompt(context));
        println!();
    }
}

fn print_table(table: &[Standing]) {
    println!(
        "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4} {:>4} {:>9}",
        "#", "Team", "M", "W", "D", "L", "Goals", "GD", "Pts", "xG"
    );
    for s in table {
        let marker = match s.zone {
            StandingZone::Top => "*",
            StandingZone::Relegation => "!",
            StandingZone::Mid => " ",
        };
        println!(
            "{:>2}{marker}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4} {:>4} {:>9}",
            s.position,
            s.row.name,
            s.row.matches_played,
            s.row.wins,
            s.row.draws,
            s.row.loses,
            s.goals_label(),
            s.goal_difference_label(),
            s.row.points,
            s.xg_label().unwrap_or_else(|| "-".to_string())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<CliArgs> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags_and_path() {
        let parsed = args(&["--json", "fixtures.json", "--export", "out.xlsx"]).unwrap();
        assert!(parsed.json);
        assert_eq!(parsed.matches_file, Some(PathBuf::from("fixtures.json")));
        assert_eq!(parsed.export_path, Some(PathBuf::from("out.xlsx")));
        assert!(parsed.table_file.is_none());
        assert!(!parsed.prompts);
    }

    #[test]
    fn parses_fixtures_and_prompts() {
        let parsed = args(&["--fixtures", "history.json", "--prompts"]).unwrap();
        assert_eq!(parsed.fixtures_file, Some(PathBuf::from("history.json")));
        assert!(parsed.prompts);
        assert!(args(&["--fixtures"]).is_err());
    }

    #[test]
    fn rejects_unknown_or_incomplete_flags() {
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["--table"]).is_err());
    }
}
