//! Event cullers
//!
//! Both cullers compute their statistics over the whole collection, then
//! filter every set against the same surviving vocabulary.

use super::{EventCuller, Plugin, PluginParameters};
use crate::error::PluginError;
use crate::histogram::EventHistogram;
use crate::models::{Event, EventSet};
use std::collections::HashSet;
use tracing::debug;

fn corpus_histogram(sets: &[EventSet]) -> EventHistogram {
    EventHistogram::from_events(sets.iter().flat_map(|s| s.iter().cloned()))
}

/// Keeps the N events most frequent across all sets
pub struct MostCommonEvents {
    events: usize,
}

impl MostCommonEvents {
    pub const DEFAULT_EVENTS: usize = 50;

    pub fn new(events: usize) -> Self {
        Self { events }
    }

    /// Reads `events` (default 50)
    pub fn from_parameters(params: &PluginParameters) -> Result<Self, PluginError> {
        Ok(Self::new(params.positive_usize("events", Self::DEFAULT_EVENTS)?))
    }
}

impl Plugin for MostCommonEvents {
    fn display_name(&self) -> &str {
        "Most Common Events"
    }

    fn tooltip(&self) -> &str {
        "Analyze only the N most common events across all documents"
    }
}

impl EventCuller for MostCommonEvents {
    fn cull(&self, sets: Vec<EventSet>) -> Vec<EventSet> {
        let corpus = corpus_histogram(&sets);
        let keep: HashSet<Event> = corpus
            .most_common()
            .into_iter()
            .take(self.events)
            .map(|(e, _)| e.clone())
            .collect();
        debug!("Keeping {} of {} distinct events", keep.len(), corpus.distinct());

        sets.iter().map(|s| s.retain(|e| keep.contains(e))).collect()
    }
}

/// Drops events seen fewer than `min` times across all sets
pub struct MinimumFrequency {
    min: usize,
}

impl MinimumFrequency {
    pub const DEFAULT_MIN: usize = 2;

    pub fn new(min: usize) -> Self {
        Self { min }
    }

    /// Reads `min` (default 2)
    pub fn from_parameters(params: &PluginParameters) -> Result<Self, PluginError> {
        Ok(Self::new(params.positive_usize("min", Self::DEFAULT_MIN)?))
    }
}

impl Plugin for MinimumFrequency {
    fn display_name(&self) -> &str {
        "Minimum Frequency"
    }

    fn tooltip(&self) -> &str {
        "Drop events occurring fewer than N times across all documents"
    }
}

impl EventCuller for MinimumFrequency {
    fn cull(&self, sets: Vec<EventSet>) -> Vec<EventSet> {
        let corpus = corpus_histogram(&sets);
        sets.iter()
            .map(|s| s.retain(|e| corpus.absolute_frequency(e) >= self.min))
            .collect()
    }
}
