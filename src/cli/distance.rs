//! Distance command - score an unknown document against each known

use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};

use super::{read_document, Session};
use authorship::config::PipelineConfig;
use authorship::pipeline::Pipeline;

/// Run the distance command
pub fn run(
    session: &Session,
    config: &PipelineConfig,
    unknown: &Path,
    known: &[PathBuf],
) -> Result<()> {
    let pipeline = Pipeline::from_config(session.registry.catalogue(), config)?;

    let unknown = read_document(unknown)?;
    let knowns = known
        .iter()
        .map(|p| read_document(p))
        .collect::<Result<Vec<_>>>()?;

    let report = pipeline.pairwise_distances(&unknown, &knowns)?;

    if session.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "\n{} from {}\n",
        style(&report.distance).bold(),
        style(&report.unknown).cyan()
    );
    for pair in &report.ranking {
        println!("  {:>10.6}  {}", pair.score(), pair.label());
    }
    for failure in &report.failures {
        println!(
            "  {:>10}  {} {}",
            style("error").red(),
            failure.known,
            style(&failure.reason).dim()
        );
    }
    println!();
    Ok(())
}
