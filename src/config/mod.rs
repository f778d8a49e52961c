//! Configuration module
//!
//! This module handles:
//! - Project-level configuration (authorship.toml)
//! - Pipeline stage selection
//! - Per-plugin factory parameters
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, normalize_plugin_name, unit_key, CliDefaults,
    DiscoveryConfig, PipelineConfig, ProjectConfig,
};
