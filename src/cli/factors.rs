//! Factors command - events most correlated with a numeric score

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::{read_labeled, LabeledPath, Session};
use authorship::config::PipelineConfig;
use authorship::pipeline::Pipeline;
use authorship::plugins::TrainingReport;

#[derive(Serialize)]
struct FactorsOutput<'a> {
    documents: usize,
    #[serde(flatten)]
    report: &'a TrainingReport,
}

/// Run the factors command
pub fn run(
    session: &Session,
    config: &PipelineConfig,
    known: &[LabeledPath],
    top: Option<usize>,
) -> Result<()> {
    let pipeline = Pipeline::from_config(session.registry.catalogue(), config)?;
    let knowns = read_labeled(known)?;

    let mut report = pipeline.train_report(&knowns)?;
    if let Some(n) = top {
        report.ranking.truncate(n);
    }

    if session.json {
        let output = FactorsOutput {
            documents: knowns.len(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "\n{} ({} documents)\n",
        style("Events by |correlation|").bold(),
        knowns.len()
    );
    for pair in &report.ranking {
        let score = *pair.score();
        let shown = format!("{:>+8.4}", score);
        let shown = if score >= 0.0 {
            style(shown).green()
        } else {
            style(shown).red()
        };
        println!("  {}  {}", shown, pair.label());
    }
    if !report.undefined.is_empty() {
        println!(
            "\n  {} {}",
            style("Undefined (constant frequency):").dim(),
            report.undefined.join(", ")
        );
    }
    println!();
    Ok(())
}
