//! Output formatting helpers for CLI commands

use crate::suite::{OutcomeRecord, RunSummary, SuiteReport};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;

/// Machine-readable run output.
#[derive(Debug, Serialize)]
pub struct SummaryView<'a> {
    pub overall_success: bool,
    #[serde(flatten)]
    pub summary: &'a RunSummary,
}

/// View model for `models` output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelView {
    pub id: String,
    /// Listed by the gateway's `/v1/models`
    pub advertised: bool,
    /// Named in the suite configuration
    pub configured: bool,
}

/// Get status icon for an outcome
pub fn status_icon(passed: bool) -> &'static str {
    if passed {
        "✓"
    } else {
        "✗"
    }
}

/// One line per scenario invocation
pub fn format_outcome_line(record: &OutcomeRecord) -> String {
    let status = if record.passed {
        format!("{} PASS", status_icon(true)).green().to_string()
    } else {
        format!("{} FAIL", status_icon(false)).red().to_string()
    };
    let detail = match record.category {
        Some(category) => format!("[{}] {}", category, record.reason),
        None => record.reason.clone(),
    };
    format!(
        "  iteration {} {:<16} {} {}",
        record.iteration,
        record.scenario.name(),
        status,
        detail
    )
}

/// Per-scenario lines for one model
pub fn format_report_lines(report: &SuiteReport) -> String {
    let mut lines = vec![format!("Model: {}", report.model.bold())];
    lines.extend(report.outcomes.iter().map(format_outcome_line));
    lines.join("\n")
}

/// Success rate to one decimal place
pub fn format_rate(report: &SuiteReport) -> String {
    format!("{:.1}%", report.success_rate())
}

/// Format per-model summary as a table
pub fn format_summary_table(summary: &RunSummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Model",
        "Attempted",
        "Passed",
        "Success Rate",
        "Plain",
        "Tool",
        "Structured",
        "Result",
    ]);

    for report in &summary.reports {
        let result = if report.is_success() {
            "PASS".green().to_string()
        } else {
            "FAIL".red().to_string()
        };
        let mut row = vec![
            Cell::new(&report.model),
            Cell::new(report.attempted),
            Cell::new(report.passed),
            Cell::new(format_rate(report)),
        ];
        for scenario in crate::scenario::Scenario::ALL {
            let tally = report.scenarios.get(&scenario).copied().unwrap_or_default();
            row.push(Cell::new(format!("{}/{}", tally.passed, tally.attempted)));
        }
        row.push(Cell::new(result));
        table.add_row(row);
    }

    table.to_string()
}

/// Overall verdict line
pub fn format_verdict(summary: &RunSummary) -> String {
    if summary.overall_success() {
        format!("{} Overall: PASS", status_icon(true))
            .green()
            .bold()
            .to_string()
    } else {
        let failing: Vec<_> = summary
            .reports
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| r.model.as_str())
            .collect();
        format!(
            "{} Overall: FAIL ({})",
            status_icon(false),
            failing.join(", ")
        )
        .red()
        .bold()
        .to_string()
    }
}

/// Full human-readable report
pub fn format_summary(summary: &RunSummary) -> String {
    let mut sections: Vec<String> = summary.reports.iter().map(format_report_lines).collect();
    sections.push(format_summary_table(summary));
    sections.push(format_verdict(summary));
    sections.join("\n\n")
}

/// Format run summary as JSON
pub fn format_summary_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SummaryView {
        overall_success: summary.overall_success(),
        summary,
    })
}

/// Format models as a table
pub fn format_models_table(models: &[ModelView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Model", "Advertised", "Configured"]);

    for m in models {
        let advertised = if m.advertised {
            status_icon(true).green().to_string()
        } else {
            status_icon(false).red().to_string()
        };
        let configured = if m.configured { status_icon(true) } else { "" };
        table.add_row(vec![
            Cell::new(&m.id),
            Cell::new(advertised),
            Cell::new(configured),
        ]);
    }

    table.to_string()
}

/// Format models as JSON
pub fn format_models_json(models: &[ModelView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "models": models
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{Failure, PassKind, ScenarioOutcome};
    use crate::scenario::Scenario;

    fn summary() -> RunSummary {
        let mut m1 = SuiteReport::new("m1");
        let mut m2 = SuiteReport::new("m2");
        for iteration in 1..=3 {
            for scenario in Scenario::ALL {
                m1.record(iteration, scenario, &ScenarioOutcome::Pass(PassKind::TextAnswer));
                let outcome = if iteration == 2 && scenario == Scenario::StructuredJson {
                    Failure::Semantic("'/steps' must contain at least one element".into()).into()
                } else {
                    ScenarioOutcome::Pass(PassKind::TextAnswer)
                };
                m2.record(iteration, scenario, &outcome);
            }
        }
        let mut summary = RunSummary::new("http://localhost:8000");
        summary.push(m1);
        summary.push(m2);
        summary.finish();
        summary
    }

    #[test]
    fn test_format_summary_table() {
        let output = format_summary_table(&summary());
        assert!(output.contains("m1"));
        assert!(output.contains("100.0%"));
        assert!(output.contains("88.9%"));
        assert!(output.contains("2/3"));
        assert!(output.contains("Success Rate"));
    }

    #[test]
    fn test_format_outcome_line_failure() {
        let summary = summary();
        let failure = summary.reports[1].failures().next().unwrap();
        let line = format_outcome_line(failure);
        assert!(line.contains("structured_json"));
        assert!(line.contains("FAIL"));
        assert!(line.contains("[semantic]"));
        assert!(line.contains("/steps"));
    }

    #[test]
    fn test_format_verdict_names_failing_models() {
        let verdict = format_verdict(&summary());
        assert!(verdict.contains("FAIL"));
        assert!(verdict.contains("m2"));
        assert!(!verdict.contains("m1"));
    }

    #[test]
    fn test_format_summary_json() {
        let json = format_summary_json(&summary()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["overall_success"], false);
        assert_eq!(parsed["gateway"], "http://localhost:8000");
        assert_eq!(parsed["reports"][0]["attempted"], 9);
        assert_eq!(parsed["reports"][1]["passed"], 8);
        assert!(parsed["finished_at"].is_string());
    }

    #[test]
    fn test_format_models() {
        let models = vec![
            ModelView {
                id: "gemini-2.5-pro".to_string(),
                advertised: true,
                configured: true,
            },
            ModelView {
                id: "gpt-4o".to_string(),
                advertised: false,
                configured: true,
            },
        ];
        let table = format_models_table(&models);
        assert!(table.contains("gemini-2.5-pro"));
        assert!(table.contains("Advertised"));

        let json = format_models_json(&models).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["models"][1]["advertised"], false);
    }

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(true), "✓");
        assert_eq!(status_icon(false), "✗");
    }
}
