//! Attribute command - rank candidate authors for an unknown document

use anyhow::Result;
use console::style;
use std::path::Path;

use super::{read_document, read_labeled, LabeledPath, Session};
use authorship::config::PipelineConfig;
use authorship::pipeline::Pipeline;

/// Run the attribute command
pub fn run(
    session: &Session,
    config: &PipelineConfig,
    unknown: &Path,
    known: &[LabeledPath],
) -> Result<()> {
    let pipeline = Pipeline::from_config(session.registry.catalogue(), config)?;

    let unknown = read_document(unknown)?;
    let knowns = read_labeled(known)?;
    let attribution = pipeline.attribute(&knowns, &unknown)?;

    if session.json {
        println!("{}", serde_json::to_string_pretty(&attribution)?);
        return Ok(());
    }

    println!(
        "\n{} on {}\n",
        style(&attribution.driver).bold(),
        style(&attribution.unknown).cyan()
    );
    if attribution.ranking.is_empty() {
        println!("  {}", style("(no per-document scores)").dim());
    }
    for (rank, pair) in attribution.ranking.iter().enumerate() {
        println!("  {:>3}. {:<30} {:.6}", rank + 1, pair.label(), pair.score());
    }
    println!();
    Ok(())
}
