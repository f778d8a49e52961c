//! Pipeline-stage plugins
//!
//! Every plugin fulfils one capability:
//!
//! ```text
//! Document ─▶ Canonicizer* ─▶ EventDriver ─▶ EventCuller* ─▶ EventSet
//!                                                              │
//!                         DistanceFunction / AnalysisDriver ◀──┘
//!                                        │
//!                                        ▼
//!                          ranked (label, score) pairs
//! ```
//!
//! # Built-in plugins
//!
//! ## Canonicizers
//! - `unify_case`, `normalize_whitespace`, `strip_punctuation`
//!
//! ## Event drivers
//! - `words`, `characters`, `character_ngrams` (parameter `n`)
//!
//! ## Event cullers
//! - `most_common_events` (parameter `events`), `minimum_frequency` (parameter `min`)
//!
//! ## Distance functions
//! - `soergel_distance`, `manhattan_distance`, `cosine_distance`
//!
//! ## Analysis drivers
//! - `pearson_factor_analysis` - ranks events by correlation with numeric labels
//! - `nearest_neighbor` (parameter `distance`) - ranks known authors by distance
//!
//! ## Languages
//! - `english`, `generic`

mod base;
pub mod canonicizers;
pub mod classifiers;
pub mod distances;
pub mod event_cullers;
pub mod event_drivers;
pub mod languages;

pub use base::{
    by_display_name, AnalysisDriver, AnyPlugin, Canonicizer, Capability, DistanceFunction,
    EventCuller, EventDriver, Language, ParameterValue, Plugin, PluginOrder, PluginParameters,
    TrainedModel, TrainingReport,
};

use crate::registry::RegistrationTable;
use std::sync::Arc;

/// Register every built-in plugin
pub fn register_builtin(table: &mut RegistrationTable) {
    table
        // Canonicizers
        .register(Capability::Canonicizer, "unify_case", |_, _| {
            Ok(AnyPlugin::Canonicizer(Arc::new(canonicizers::UnifyCase)))
        })
        .register(Capability::Canonicizer, "normalize_whitespace", |_, _| {
            Ok(AnyPlugin::Canonicizer(Arc::new(canonicizers::NormalizeWhitespace)))
        })
        .register(Capability::Canonicizer, "strip_punctuation", |_, _| {
            Ok(AnyPlugin::Canonicizer(Arc::new(canonicizers::StripPunctuation)))
        })
        // Event drivers
        .register(Capability::EventDriver, "words", |_, _| {
            Ok(AnyPlugin::EventDriver(Arc::new(event_drivers::WordEventDriver)))
        })
        .register(Capability::EventDriver, "characters", |_, _| {
            Ok(AnyPlugin::EventDriver(Arc::new(event_drivers::CharacterEventDriver)))
        })
        .register(Capability::EventDriver, "character_ngrams", |params, _| {
            let driver = event_drivers::CharacterNGramEventDriver::from_parameters(params)?;
            Ok(AnyPlugin::EventDriver(Arc::new(driver)))
        })
        // Event cullers
        .register(Capability::EventCuller, "most_common_events", |params, _| {
            let culler = event_cullers::MostCommonEvents::from_parameters(params)?;
            Ok(AnyPlugin::EventCuller(Arc::new(culler)))
        })
        .register(Capability::EventCuller, "minimum_frequency", |params, _| {
            let culler = event_cullers::MinimumFrequency::from_parameters(params)?;
            Ok(AnyPlugin::EventCuller(Arc::new(culler)))
        })
        // Distance functions
        .register(Capability::DistanceFunction, "soergel_distance", |_, _| {
            Ok(AnyPlugin::DistanceFunction(Arc::new(distances::SoergelDistance)))
        })
        .register(Capability::DistanceFunction, "manhattan_distance", |_, _| {
            Ok(AnyPlugin::DistanceFunction(Arc::new(distances::ManhattanDistance)))
        })
        .register(Capability::DistanceFunction, "cosine_distance", |_, _| {
            Ok(AnyPlugin::DistanceFunction(Arc::new(distances::CosineDistance)))
        })
        // Analysis drivers
        .register(Capability::AnalysisDriver, "pearson_factor_analysis", |_, _| {
            Ok(AnyPlugin::AnalysisDriver(Arc::new(
                classifiers::PearsonFactorAnalysis,
            )))
        })
        .register(Capability::AnalysisDriver, "nearest_neighbor", |params, table| {
            let driver = classifiers::NearestNeighborDriver::from_parameters(params, table)?;
            Ok(AnyPlugin::AnalysisDriver(Arc::new(driver)))
        })
        // Languages
        .register(Capability::Language, "english", |_, _| {
            Ok(AnyPlugin::Language(Arc::new(languages::English)))
        })
        .register(Capability::Language, "generic", |_, _| {
            Ok(AnyPlugin::Language(Arc::new(languages::Generic)))
        });
}
