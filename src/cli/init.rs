//! Init command - write an example project config

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const EXAMPLE_CONFIG: &str = r#"# Authorship configuration

[discovery]
# Directory or zip archive holding <capability>/<unit>.plugin entries.
# Leave unset to use the built-in bundle.
# root = "plugins"

[pipeline]
canonicizers = ["unify_case", "normalize_whitespace"]
event_driver = "words"
# event_cullers = ["most_common_events"]
distance = "soergel_distance"
analysis = "nearest_neighbor"
# language = "english"

[plugins.character_ngrams]
n = 3

[plugins.most_common_events]
events = 50

[plugins.nearest_neighbor]
distance = "soergel_distance"

[defaults]
format = "text"
"#;

/// Run the init command
pub fn run(dir: &Path) -> Result<()> {
    let config_path = dir.join("authorship.toml");
    if config_path.exists() {
        println!(
            "{} Config already exists at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    Ok(())
}
