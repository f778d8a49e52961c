//! Capability contracts shared by every pipeline stage
//!
//! This module defines the core abstractions plugins implement:
//! - `Plugin` metadata (display name, tooltip, GUI visibility)
//! - one trait per capability (`Canonicizer`, `EventDriver`, ...)
//! - `AnyPlugin`, the instance a factory hands back to discovery
//! - `PluginParameters` for factory configuration

use crate::error::{
    AnalysisError, DistanceCalculationError, EventGenerationError, PluginError,
};
use crate::models::{Document, EventSet};
use crate::ranked::RankedPair;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Metadata every plugin exposes, whatever its capability
pub trait Plugin: Send + Sync {
    /// Name shown in listings; also the presentation sort key
    fn display_name(&self) -> &str;

    /// Longer description
    ///
    /// Default: the display name
    fn tooltip(&self) -> &str {
        self.display_name()
    }

    /// Whether a GUI should offer this plugin
    ///
    /// Default: `true`
    fn show_in_gui(&self) -> bool {
        true
    }
}

/// Normalizes raw document text before feature extraction
///
/// Implementations must be pure: no state carried between documents.
pub trait Canonicizer: Plugin {
    fn process(&self, text: &str) -> String;
}

/// Extracts events from canonicized text
pub trait EventDriver: Plugin {
    /// Build the event set of `document`, carrying over its id and author
    fn create_event_set(&self, document: &Document) -> Result<EventSet, EventGenerationError>;
}

/// Filters event sets before scoring
///
/// Cullers see the whole collection so corpus-wide statistics are possible.
pub trait EventCuller: Plugin {
    fn cull(&self, sets: Vec<EventSet>) -> Vec<EventSet>;
}

/// Dissimilarity between two event sets
pub trait DistanceFunction: Plugin {
    /// Fails when the sets share nothing comparable or a denominator is zero
    fn distance(
        &self,
        unknown: &EventSet,
        known: &EventSet,
    ) -> Result<f64, DistanceCalculationError>;
}

/// Trains on labeled event sets
///
/// Training state is the returned model: a driver is a stateless
/// descriptor and can train any number of models concurrently.
pub trait AnalysisDriver: Plugin {
    fn train(&self, knowns: &[EventSet]) -> Result<Box<dyn TrainedModel>, AnalysisError>;
}

/// Feature ranking produced while training
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainingReport {
    /// Ranked (event, score) pairs
    pub ranking: Vec<RankedPair<String>>,
    /// Events left out because their statistic is undefined
    pub undefined: Vec<String>,
}

/// A model produced by [`AnalysisDriver::train`]
pub trait TrainedModel: Send + Sync {
    /// Score `unknown` against the training data
    ///
    /// May legitimately be empty when the driver's output is its training
    /// report.
    fn analyze(&self, unknown: &EventSet) -> Result<Vec<RankedPair<String>>, AnalysisError>;

    /// Report produced during training, if the driver makes one
    fn report(&self) -> Option<&TrainingReport> {
        None
    }
}

/// Preferred processing for one natural language
pub trait Language: Plugin {
    /// Language identifier (e.g. "en")
    fn language(&self) -> &str;

    /// Unit names of canonicizers suited to this language
    fn preferred_canonicizers(&self) -> &[&'static str] {
        &[]
    }

    /// Unit names of event drivers suited to this language
    fn preferred_event_drivers(&self) -> &[&'static str] {
        &[]
    }
}

/// The six pipeline capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Canonicizer,
    EventDriver,
    EventCuller,
    DistanceFunction,
    AnalysisDriver,
    Language,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::Canonicizer,
        Capability::EventDriver,
        Capability::EventCuller,
        Capability::DistanceFunction,
        Capability::AnalysisDriver,
        Capability::Language,
    ];

    /// Relative path holding this capability's units
    pub fn path(&self) -> &'static str {
        match self {
            Capability::Canonicizer => "canonicizers",
            Capability::EventDriver => "event_drivers",
            Capability::EventCuller => "event_cullers",
            Capability::DistanceFunction => "distances",
            Capability::AnalysisDriver => "classifiers",
            Capability::Language => "languages",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Canonicizer => "canonicizer",
            Capability::EventDriver => "event driver",
            Capability::EventCuller => "event culler",
            Capability::DistanceFunction => "distance function",
            Capability::AnalysisDriver => "analysis driver",
            Capability::Language => "language",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An instantiated plugin of any capability
#[derive(Clone)]
pub enum AnyPlugin {
    Canonicizer(Arc<dyn Canonicizer>),
    EventDriver(Arc<dyn EventDriver>),
    EventCuller(Arc<dyn EventCuller>),
    DistanceFunction(Arc<dyn DistanceFunction>),
    AnalysisDriver(Arc<dyn AnalysisDriver>),
    Language(Arc<dyn Language>),
}

macro_rules! dispatch {
    ($self:ident, $p:ident => $body:expr) => {
        match $self {
            AnyPlugin::Canonicizer($p) => $body,
            AnyPlugin::EventDriver($p) => $body,
            AnyPlugin::EventCuller($p) => $body,
            AnyPlugin::DistanceFunction($p) => $body,
            AnyPlugin::AnalysisDriver($p) => $body,
            AnyPlugin::Language($p) => $body,
        }
    };
}

impl AnyPlugin {
    pub fn capability(&self) -> Capability {
        match self {
            AnyPlugin::Canonicizer(_) => Capability::Canonicizer,
            AnyPlugin::EventDriver(_) => Capability::EventDriver,
            AnyPlugin::EventCuller(_) => Capability::EventCuller,
            AnyPlugin::DistanceFunction(_) => Capability::DistanceFunction,
            AnyPlugin::AnalysisDriver(_) => Capability::AnalysisDriver,
            AnyPlugin::Language(_) => Capability::Language,
        }
    }

    pub fn display_name(&self) -> &str {
        dispatch!(self, p => p.display_name())
    }

    pub fn tooltip(&self) -> &str {
        dispatch!(self, p => p.tooltip())
    }

    pub fn show_in_gui(&self) -> bool {
        dispatch!(self, p => p.show_in_gui())
    }
}

impl fmt::Debug for AnyPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyPlugin")
            .field("capability", &self.capability())
            .field("display_name", &self.display_name())
            .finish()
    }
}

/// Ordering policy applied to discovered plugins
pub type PluginOrder = fn(&AnyPlugin, &AnyPlugin) -> Ordering;

/// Natural presentation order: by display name
pub fn by_display_name(a: &AnyPlugin, b: &AnyPlugin) -> Ordering {
    a.display_name().cmp(b.display_name())
}

/// A factory parameter: integer, float, boolean or string
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl ParameterValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParameterValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Integer(v) => Some(*v as f64),
            ParameterValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// Named parameters handed to a plugin factory
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PluginParameters {
    values: HashMap<String, ParameterValue>,
}

impl PluginParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter
    pub fn with(mut self, name: impl Into<String>, value: ParameterValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    /// A positive integer parameter, `default` when unset
    pub fn positive_usize(&self, name: &str, default: usize) -> Result<usize, PluginError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(value) => match value.as_i64() {
                Some(v) if v > 0 => Ok(v as usize),
                _ => Err(PluginError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("expected a positive integer, got {:?}", value),
                }),
            },
        }
    }

    /// A string parameter, `default` when unset
    pub fn string_or<'a>(&'a self, name: &str, default: &'a str) -> Result<&'a str, PluginError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(value) => value.as_str().ok_or_else(|| PluginError::InvalidParameter {
                name: name.to_string(),
                reason: format!("expected a string, got {:?}", value),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Plugin for Named {
        fn display_name(&self) -> &str {
            self.0
        }
    }

    impl Canonicizer for Named {
        fn process(&self, text: &str) -> String {
            text.to_string()
        }
    }

    #[test]
    fn test_plugin_defaults() {
        let p = Named("Identity");
        assert_eq!(p.tooltip(), "Identity");
        assert!(p.show_in_gui());
    }

    #[test]
    fn test_any_plugin_metadata() {
        let any = AnyPlugin::Canonicizer(Arc::new(Named("Identity")));
        assert_eq!(any.capability(), Capability::Canonicizer);
        assert_eq!(any.display_name(), "Identity");
        assert!(any.show_in_gui());
    }

    #[test]
    fn test_capability_paths_are_distinct() {
        let paths: std::collections::HashSet<_> =
            Capability::ALL.iter().map(|c| c.path()).collect();
        assert_eq!(paths.len(), 6);
    }

    #[test]
    fn test_by_display_name() {
        let a = AnyPlugin::Canonicizer(Arc::new(Named("A")));
        let b = AnyPlugin::Canonicizer(Arc::new(Named("B")));
        assert_eq!(by_display_name(&a, &b), Ordering::Less);
        assert_eq!(by_display_name(&b, &b), Ordering::Equal);
    }

    #[test]
    fn test_parameters() {
        let params = PluginParameters::new()
            .with("n", ParameterValue::Integer(3))
            .with("bad", ParameterValue::Integer(0))
            .with("distance", ParameterValue::String("cosine".into()));

        assert_eq!(params.positive_usize("n", 2), Ok(3));
        assert_eq!(params.positive_usize("missing", 2), Ok(2));
        assert!(params.positive_usize("bad", 2).is_err());
        assert_eq!(params.string_or("distance", "soergel"), Ok("cosine"));
        assert!(params.string_or("n", "x").is_err());
    }

    #[test]
    fn test_parameters_from_toml() {
        let params: PluginParameters = toml::from_str("n = 4\nlabel = \"x\"\nflag = true").unwrap();
        assert_eq!(params.get("n"), Some(&ParameterValue::Integer(4)));
        assert_eq!(params.get("flag").and_then(|v| v.as_bool()), Some(true));
    }
}
