//! Authorship attribution pipeline
//!
//! Documents flow through pluggable stages:
//! canonicizers → event driver → event cullers → distance function or
//! analysis driver, producing ranked (label, score) results.
//!
//! Stage implementations are discovered once per process by the
//! [`registry`], from a plugin directory, a zip archive, or the built-in
//! bundle.

pub mod config;
pub mod error;
pub mod histogram;
pub mod models;
pub mod pipeline;
pub mod plugins;
pub mod ranked;
pub mod registry;
pub mod stats;

pub use error::{
    AnalysisError, DiscoveryError, DistanceCalculationError, EventGenerationError, PipelineError,
    PluginError,
};
pub use histogram::EventHistogram;
pub use models::{Document, Event, EventSet};
pub use pipeline::Pipeline;
pub use ranked::RankedPair;
pub use registry::{Catalogue, Registry};
