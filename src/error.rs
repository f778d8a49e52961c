//! Error types for the attribution pipeline
//!
//! Discovery errors are recovered locally and turned into diagnostics.
//! Scoring errors (distance, analysis) surface to the caller and fail only
//! the document or document pair they belong to.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while listing or instantiating plugin units
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiscoveryError {
    #[error("cannot open {location} for reading: {reason}")]
    Unreadable { location: String, reason: String },

    #[error("no registered plugin named '{unit}'")]
    Unresolved { unit: String },

    #[error("problem instantiating '{unit}': {source}")]
    Instantiation {
        unit: String,
        #[source]
        source: PluginError,
    },

    #[error("'{unit}' is a {found}, not a {expected}")]
    CapabilityMismatch {
        unit: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Failure raised by a plugin factory
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PluginError {
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("{0}")]
    Unavailable(String),
}

/// A distance function could not produce a meaningful number
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{function}: {reason}")]
pub struct DistanceCalculationError {
    pub function: String,
    pub reason: String,
}

impl DistanceCalculationError {
    pub fn new(function: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            reason: reason.into(),
        }
    }
}

/// An event driver could not turn text into an event set
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{driver} failed on document '{document}': {reason}")]
pub struct EventGenerationError {
    pub driver: String,
    pub document: String,
    pub reason: String,
}

/// Failures during training or analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("label '{label}' of document '{document}' is not a number")]
    LabelParse { document: String, label: String },

    #[error("document '{document}' has no author label")]
    MissingLabel { document: String },

    #[error("statistically degenerate input: {0}")]
    StatisticalDegeneracy(String),

    #[error("no known documents to train on")]
    EmptyTrainingSet,

    #[error("comparing '{unknown}' with '{known}': {source}")]
    Distance {
        unknown: String,
        known: String,
        #[source]
        source: DistanceCalculationError,
    },
}

/// Failures while wiring or running a pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no {capability} matches '{selector}'")]
    UnknownPlugin {
        capability: &'static str,
        selector: String,
    },

    #[error("no {0} configured")]
    MissingStage(&'static str),

    #[error(transparent)]
    EventGeneration(#[from] EventGenerationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("failed to read document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
