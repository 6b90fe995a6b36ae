//! Story reports and their renderers.

use std::fmt::{Display, Write as _};

use anyhow::Context;
use bloom_ui::SyncOutcome;
use clap::ValueEnum;
use serde::Serialize;

/// Output selection for rendered reports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Fact {
    pub(crate) label: &'static str,
    pub(crate) value: String,
}

/// What a scenario left behind, as label/value pairs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct StoryReport {
    pub(crate) scenario: &'static str,
    pub(crate) tool: &'static str,
    pub(crate) facts: Vec<Fact>,
}

impl StoryReport {
    pub(crate) const fn new(scenario: &'static str, tool: &'static str) -> Self {
        Self {
            scenario,
            tool,
            facts: Vec::new(),
        }
    }

    pub(crate) fn fact(&mut self, label: &'static str, value: impl Display) -> &mut Self {
        self.facts.push(Fact {
            label,
            value: value.to_string(),
        });
        self
    }

    pub(crate) fn outcome(&mut self, label: &'static str, outcome: SyncOutcome) -> &mut Self {
        self.fact(label, outcome_label(outcome))
    }

    pub(crate) fn optional(&mut self, label: &'static str, value: Option<impl Display>) -> &mut Self {
        match value {
            Some(value) => self.fact(label, value),
            None => self.fact(label, "-"),
        }
    }
}

#[cfg(test)]
impl StoryReport {
    pub(crate) fn value_of(&self, label: &str) -> Option<&str> {
        self.facts
            .iter()
            .find(|fact| fact.label == label)
            .map(|fact| fact.value.as_str())
    }
}

pub(crate) const fn outcome_label(outcome: SyncOutcome) -> &'static str {
    match outcome {
        SyncOutcome::Applied => "applied",
        SyncOutcome::Rejected => "rejected",
        SyncOutcome::Failed => "failed",
        SyncOutcome::Discarded => "discarded",
        SyncOutcome::Skipped => "skipped",
    }
}

pub(crate) fn render_reports(reports: &[StoryReport], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let text =
                serde_json::to_string_pretty(reports).context("failed to format JSON")?;
            println!("{text}");
        }
        OutputFormat::Table => {
            for (index, report) in reports.iter().enumerate() {
                if index > 0 {
                    println!();
                }
                print!("{}", render_table(report));
            }
        }
    }
    Ok(())
}

pub(crate) fn render_table(report: &StoryReport) -> String {
    let width = report
        .facts
        .iter()
        .map(|fact| fact.label.len())
        .max()
        .unwrap_or(0);
    let mut text = format!("== {} ({}) ==\n", report.scenario, report.tool);
    for fact in &report.facts {
        let _ = writeln!(text, "{:<width$}  {}", fact.label, fact.value);
    }
    text
}
