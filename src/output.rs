use std::fmt::Write as _;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::diagnostics::BuildDiagnostic;
use crate::explain::{Explained, Outcome};

/// Counts per outcome, for the summary line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub enriched: usize,
    pub passed_through: usize,
    pub not_applicable: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(results: &[Explained]) -> Self {
        let mut summary = Self::default();
        for r in results {
            match r.outcome {
                Outcome::Enriched(_) => summary.enriched += 1,
                Outcome::PassedThrough => summary.passed_through += 1,
                Outcome::NotApplicable => summary.not_applicable += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    fn total(&self) -> usize {
        self.enriched + self.passed_through + self.not_applicable + self.failed
    }
}

/// Human-readable report: enriched diagnostics in full, everything else in
/// default `<name>: <message>` form, followed by a summary line.
pub fn format_compact(results: &[Explained]) -> String {
    let mut out = String::new();
    for r in results {
        match &r.outcome {
            Outcome::Enriched(d) => {
                writeln!(out, "{}", d.label).unwrap();
                writeln!(out, "{}", d.body).unwrap();
            }
            Outcome::PassedThrough | Outcome::NotApplicable => {
                writeln!(out, "{}: {}", r.name, r.message).unwrap();
            }
            Outcome::Failed(reason) => {
                writeln!(out, "{}: {}", r.name, r.message).unwrap();
                writeln!(out, "error: {reason}").unwrap();
            }
        }
        out.push('\n');
    }

    let summary = Summary::of(results);
    write!(
        out,
        "{} errors: {} enriched, {} passed through, {} not applicable, {} failed",
        summary.total(),
        summary.enriched,
        summary.passed_through,
        summary.not_applicable,
        summary.failed,
    )
    .unwrap();
    out
}

/// One reported error in JSON output. Diagnostic fields are present only for
/// enriched errors.
#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    name: &'a str,
    message: &'a str,
    outcome: &'static str,
    #[serde(flatten)]
    diagnostic: Option<&'a BuildDiagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

/// Structured JSON array, one object per reported error.
pub fn format_json(results: &[Explained]) -> anyhow::Result<String> {
    let records: Vec<JsonRecord<'_>> = results
        .iter()
        .map(|r| {
            let (outcome, diagnostic, reason) = match &r.outcome {
                Outcome::Enriched(d) => ("enriched", Some(d), None),
                Outcome::PassedThrough => ("passed_through", None, None),
                Outcome::NotApplicable => ("not_applicable", None, None),
                Outcome::Failed(reason) => ("failed", None, Some(reason.as_str())),
            };
            JsonRecord {
                name: &r.name,
                message: &r.message,
                outcome,
                diagnostic,
                reason,
            }
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Format and print results to stdout according to the selected output format.
pub fn print_results(results: &[Explained], format: &OutputFormat) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Compact => format_compact(results),
        OutputFormat::Json => format_json(results)?,
    };
    println!("{rendered}");
    Ok(())
}
