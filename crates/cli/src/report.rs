//! Outcome rendering (table or JSON on stdout)

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use tabled::{Table, Tabled};

use httpcheck_core::application::ProbeMode;
use httpcheck_core::domain::{ProbeConfig, ProbeOutcome, Severity};

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Status")]
    severity: Severity,
    #[tabled(rename = "Message")]
    message: String,
}

pub fn render_table(task: &str, mode: ProbeMode, outcome: &ProbeOutcome) -> String {
    let rows: Vec<Row> = outcome
        .iter()
        .map(|entry| Row {
            severity: entry.severity,
            message: entry.message.clone(),
        })
        .collect();

    let summary = if outcome.has_alerts() {
        "✗ Needs attention".red().bold()
    } else {
        "✓ All good".green().bold()
    };

    format!(
        "{} {}\n\n{}\n\n{}",
        format!("[{}]", mode).cyan().bold(),
        task,
        Table::new(rows),
        summary
    )
}

pub fn render_json(
    task: &str,
    mode: ProbeMode,
    config: &ProbeConfig,
    outcome: &ProbeOutcome,
) -> Result<String> {
    let report = json!({
        "task": task,
        "mode": mode,
        "config": config,
        "has_alerts": outcome.has_alerts(),
        "entries": outcome.entries(),
    });
    Ok(serde_json::to_string_pretty(&report)?)
}
