//! Project configuration
//!
//! Loaded from `authorship.toml` (or `.authorshiprc.json`) in the working
//! directory:
//!
//! ```toml
//! [discovery]
//! root = "plugins.zip"
//!
//! [pipeline]
//! canonicizers = ["unify_case", "normalize_whitespace"]
//! event_driver = "character_ngrams"
//! event_cullers = ["most_common_events"]
//! distance = "Soergel Distance"
//! analysis = "nearest_neighbor"
//!
//! [plugins.character_ngrams]
//! n = 3
//!
//! [defaults]
//! format = "json"
//! ```

use crate::plugins::PluginParameters;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project-level configuration loaded from authorship.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Where plugin units are discovered
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Stage selection
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Factory parameters keyed by unit name
    #[serde(default)]
    pub plugins: HashMap<String, PluginParameters>,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DiscoveryConfig {
    /// Directory or zip archive of units; the built-in bundle when unset
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Plugin selectors for each stage, by unit or display name
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct PipelineConfig {
    /// Applied in order
    #[serde(default)]
    pub canonicizers: Vec<String>,

    #[serde(default)]
    pub event_driver: Option<String>,

    /// Applied in order
    #[serde(default)]
    pub event_cullers: Vec<String>,

    #[serde(default)]
    pub distance: Option<String>,

    #[serde(default)]
    pub analysis: Option<String>,

    /// Supplies canonicizers and event driver when those are unset
    #[serde(default)]
    pub language: Option<String>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,
}

impl ProjectConfig {
    /// Plugin parameters keyed by canonical unit name
    ///
    /// `[plugins.character-ngrams]` and `[plugins.CharacterNgrams]` both
    /// configure `character_ngrams`.
    pub fn unit_parameters(&self) -> HashMap<String, PluginParameters> {
        self.plugins
            .iter()
            .map(|(name, params)| (unit_key(name), params.clone()))
            .collect()
    }
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `authorship.toml`
/// 2. `.authorshiprc.json`
///
/// Returns default configuration if no config file is found or loadable.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in ["authorship.toml", ".authorshiprc.json"] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from an explicit file; JSON by extension, TOML otherwise
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

/// Normalize a plugin selector for comparison
///
/// Unit names, display names and class-style names all map to one form:
/// `SoergelDistance`, `soergel_distance` and `Soergel Distance` all become
/// `soergel-distance`.
pub fn normalize_plugin_name(name: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = name.trim().chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            // Split camel case; keep acronyms together (NGram -> n-gram)
            let prev_is_lower = i > 0 && chars[i - 1].is_lowercase();
            let is_acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && i + 1 < chars.len()
                && chars[i + 1].is_lowercase();

            if prev_is_lower || is_acronym_end {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else if *c == '_' || *c == ' ' || *c == '-' {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
        } else {
            result.push(*c);
        }
    }

    result.trim_end_matches('-').to_string()
}

/// Canonical unit name for a selector (`character-ngrams` -> `character_ngrams`)
pub fn unit_key(name: &str) -> String {
    normalize_plugin_name(name).replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::ParameterValue;

    #[test]
    fn test_normalize_plugin_name() {
        assert_eq!(normalize_plugin_name("SoergelDistance"), "soergel-distance");
        assert_eq!(normalize_plugin_name("soergel_distance"), "soergel-distance");
        assert_eq!(normalize_plugin_name("Soergel Distance"), "soergel-distance");
        assert_eq!(normalize_plugin_name("soergel-distance"), "soergel-distance");
        assert_eq!(
            normalize_plugin_name("Personality  Pearson Factor Analysis"),
            "personality-pearson-factor-analysis"
        );
        assert_eq!(normalize_plugin_name("HTMLStripper"), "html-stripper");
    }

    #[test]
    fn test_unit_key() {
        assert_eq!(unit_key("character-ngrams"), "character_ngrams");
        assert_eq!(unit_key("MostCommonEvents"), "most_common_events");
    }

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert!(config.discovery.root.is_none());
        assert!(config.pipeline.canonicizers.is_empty());
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let config: ProjectConfig = toml::from_str(
            r#"
[discovery]
root = "units"

[pipeline]
canonicizers = ["unify_case"]
event_driver = "character_ngrams"
distance = "Cosine Distance"

[plugins.character-ngrams]
n = 3

[defaults]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.discovery.root, Some(PathBuf::from("units")));
        assert_eq!(config.pipeline.canonicizers, vec!["unify_case"]);
        assert_eq!(config.pipeline.distance.as_deref(), Some("Cosine Distance"));
        assert_eq!(config.defaults.format.as_deref(), Some("json"));

        let params = config.unit_parameters();
        assert_eq!(
            params["character_ngrams"].get("n"),
            Some(&ParameterValue::Integer(3))
        );
    }

    #[test]
    fn test_load_project_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_project_config(dir.path()).pipeline.event_driver.is_none());

        std::fs::write(
            dir.path().join(".authorshiprc.json"),
            r#"{"pipeline": {"event_driver": "words"}}"#,
        )
        .unwrap();
        let config = load_project_config(dir.path());
        assert_eq!(config.pipeline.event_driver.as_deref(), Some("words"));

        // TOML wins over JSON
        std::fs::write(
            dir.path().join("authorship.toml"),
            "[pipeline]\nevent_driver = \"characters\"\n",
        )
        .unwrap();
        let config = load_project_config(dir.path());
        assert_eq!(config.pipeline.event_driver.as_deref(), Some("characters"));
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("authorship.toml"), "[pipeline\nbroken").unwrap();
        let config = load_project_config(dir.path());
        assert!(config.pipeline.event_driver.is_none());
    }
}
