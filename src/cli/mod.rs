//! CLI command definitions and handlers

mod attribute;
mod distance;
mod factors;
mod init;
mod list;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use authorship::config::{load_config_file, load_project_config, PipelineConfig, ProjectConfig};
use authorship::models::Document;
use authorship::registry::Registry;

/// A `LABEL=PATH` argument
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPath {
    pub label: String,
    pub path: PathBuf,
}

/// Parse `LABEL=PATH`
fn parse_labeled_path(s: &str) -> Result<LabeledPath, String> {
    match s.split_once('=') {
        Some((label, path)) if !label.is_empty() && !path.is_empty() => Ok(LabeledPath {
            label: label.to_string(),
            path: PathBuf::from(path),
        }),
        _ => Err(format!("'{}' is not LABEL=PATH", s)),
    }
}

/// Authorship - stylometric authorship attribution
#[derive(Parser, Debug)]
#[command(name = "authorship")]
#[command(
    version,
    about = "Authorship attribution with pluggable canonicizers, event drivers, cullers, distances and analysis drivers",
    after_help = "\
Examples:
  authorship list                                         Show discovered plugins
  authorship distance unknown.txt a.txt b.txt             Soergel distance to each known
  authorship attribute --known austen=emma.txt --known melville=moby.txt unknown.txt
  authorship factors --known 3.5=essay1.txt --known 1.0=essay2.txt --known 2.2=essay3.txt
  authorship --plugins units.zip list                     Discover from a zip archive"
)]
pub struct Cli {
    /// Config file (default: authorship.toml in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Plugin directory or zip archive (default: built-in bundle)
    #[arg(long, global = true)]
    pub plugins: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Output format: text, json
    #[arg(long, short = 'f', global = true, value_parser = ["text", "json"])]
    pub format: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Stage selection shared by scoring commands; overrides `[pipeline]`
#[derive(Args, Debug, Default, Clone)]
pub struct StageArgs {
    /// Canonicizer to apply, in order (repeatable)
    #[arg(long = "canonicizer")]
    pub canonicizers: Vec<String>,

    /// Event driver
    #[arg(long)]
    pub event_driver: Option<String>,

    /// Event culler to apply, in order (repeatable)
    #[arg(long = "culler")]
    pub cullers: Vec<String>,

    /// Language supplying default canonicizers and event driver
    #[arg(long)]
    pub language: Option<String>,
}

impl StageArgs {
    /// Command-line values over config values, then `fallback_driver`
    fn merge(&self, config: &PipelineConfig, fallback_driver: &str) -> PipelineConfig {
        let mut merged = config.clone();
        if !self.canonicizers.is_empty() {
            merged.canonicizers = self.canonicizers.clone();
        }
        if !self.cullers.is_empty() {
            merged.event_cullers = self.cullers.clone();
        }
        if self.event_driver.is_some() {
            merged.event_driver = self.event_driver.clone();
        }
        if self.language.is_some() {
            merged.language = self.language.clone();
        }
        if merged.event_driver.is_none() && merged.language.is_none() {
            merged.event_driver = Some(fallback_driver.to_string());
        }
        merged
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example authorship.toml to the current directory
    Init,

    /// List discovered plugins and discovery diagnostics
    List {
        /// Include plugins hidden from GUIs
        #[arg(long)]
        all: bool,
    },

    /// Distance from an unknown document to each known document
    Distance {
        /// Unknown document
        unknown: PathBuf,

        /// Known documents
        #[arg(required = true)]
        known: Vec<PathBuf>,

        /// Distance function (default: soergel_distance)
        #[arg(long)]
        distance: Option<String>,

        #[command(flatten)]
        stages: StageArgs,
    },

    /// Rank candidate authors for an unknown document
    Attribute {
        /// Unknown document
        unknown: PathBuf,

        /// Known document as AUTHOR=PATH (repeatable)
        #[arg(long, required = true, value_parser = parse_labeled_path)]
        known: Vec<LabeledPath>,

        /// Analysis driver (default: nearest_neighbor)
        #[arg(long)]
        analysis: Option<String>,

        #[command(flatten)]
        stages: StageArgs,
    },

    /// Rank events by correlation with a numeric score
    Factors {
        /// Known document as SCORE=PATH (repeatable)
        #[arg(long, required = true, value_parser = parse_labeled_path)]
        known: Vec<LabeledPath>,

        /// Show only the top N events
        #[arg(long)]
        top: Option<usize>,

        #[command(flatten)]
        stages: StageArgs,
    },
}

/// Loaded configuration plus the registry it describes
pub(crate) struct Session {
    pub config: ProjectConfig,
    pub registry: Registry,
    pub json: bool,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => load_config_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => load_project_config(Path::new(".")),
        };

        let mut builder = Registry::builder().all_parameters(config.unit_parameters());
        if let Some(root) = cli.plugins.as_ref().or(config.discovery.root.as_ref()) {
            debug!("Discovering plugins under {}", root.display());
            builder = builder.location(root);
        }
        let registry = builder.build().context("Failed to open plugin location")?;

        let format = cli
            .format
            .clone()
            .or_else(|| config.defaults.format.clone())
            .unwrap_or_else(|| "text".to_string());

        Ok(Self {
            config,
            registry,
            json: format == "json",
        })
    }
}

/// Load an unlabeled document
fn read_document(path: &Path) -> Result<Document> {
    Ok(Document::from_path(path)?)
}

/// Load `LABEL=PATH` documents, labeled
fn read_labeled(known: &[LabeledPath]) -> Result<Vec<Document>> {
    known
        .iter()
        .map(|k| -> Result<Document> { Ok(read_document(&k.path)?.with_author(&k.label)) })
        .collect()
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let session = Session::open(&cli)?;
    match cli.command {
        Commands::Init => init::run(Path::new(".")),

        Commands::List { all } => list::run(&session, all),

        Commands::Distance {
            unknown,
            known,
            distance: selector,
            stages,
        } => {
            let mut config = stages.merge(&session.config.pipeline, "words");
            config.distance = selector
                .or_else(|| config.distance.clone())
                .or_else(|| Some("soergel_distance".to_string()));
            distance::run(&session, &config, &unknown, &known)
        }

        Commands::Attribute {
            unknown,
            known,
            analysis: selector,
            stages,
        } => {
            let mut config = stages.merge(&session.config.pipeline, "words");
            config.analysis = selector
                .or_else(|| config.analysis.clone())
                .or_else(|| Some("nearest_neighbor".to_string()));
            attribute::run(&session, &config, &unknown, &known)
        }

        Commands::Factors { known, top, stages } => {
            let mut config = stages.merge(&session.config.pipeline, "words");
            config.analysis = Some("pearson_factor_analysis".to_string());
            factors::run(&session, &config, &known, top)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labeled_path() {
        assert_eq!(
            parse_labeled_path("austen=texts/emma.txt"),
            Ok(LabeledPath {
                label: "austen".into(),
                path: PathBuf::from("texts/emma.txt"),
            })
        );
        assert_eq!(parse_labeled_path("3.5=a=b.txt").unwrap().path, PathBuf::from("a=b.txt"));
        assert!(parse_labeled_path("no-label.txt").is_err());
        assert!(parse_labeled_path("=x.txt").is_err());
    }

    #[test]
    fn test_stage_args_override_config() {
        let config = PipelineConfig {
            canonicizers: vec!["unify_case".into()],
            event_driver: Some("characters".into()),
            ..Default::default()
        };

        let merged = StageArgs::default().merge(&config, "words");
        assert_eq!(merged, config);

        let args = StageArgs {
            event_driver: Some("character_ngrams".into()),
            ..Default::default()
        };
        let merged = args.merge(&config, "words");
        assert_eq!(merged.event_driver.as_deref(), Some("character_ngrams"));
        assert_eq!(merged.canonicizers, vec!["unify_case"]);
    }

    #[test]
    fn test_fallback_driver() {
        let merged = StageArgs::default().merge(&PipelineConfig::default(), "words");
        assert_eq!(merged.event_driver.as_deref(), Some("words"));

        let english = StageArgs {
            language: Some("english".into()),
            ..Default::default()
        };
        assert!(english.merge(&PipelineConfig::default(), "words").event_driver.is_none());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::parse_from([
            "authorship",
            "attribute",
            "--known",
            "a=x.txt",
            "--known",
            "b=y.txt",
            "--canonicizer",
            "unify_case",
            "u.txt",
        ]);
        match cli.command {
            Commands::Attribute { known, stages, .. } => {
                assert_eq!(known.len(), 2);
                assert_eq!(stages.canonicizers, vec!["unify_case"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
