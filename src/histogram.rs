//! Event frequency tables
//!
//! An [`EventHistogram`] is built once from an [`EventSet`] and never
//! changes. Events iterate in first-occurrence order so every ranking
//! derived from a histogram is reproducible across runs.

use crate::models::{Event, EventSet};
use crate::stats;
use indexmap::{IndexMap, IndexSet};

/// Occurrence counts of the events of one event set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventHistogram {
    counts: IndexMap<Event, usize>,
    total: usize,
}

impl EventHistogram {
    pub fn from_event_set(set: &EventSet) -> Self {
        Self::from_events(set.iter().cloned())
    }

    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut counts: IndexMap<Event, usize> = IndexMap::new();
        let mut total = 0;
        for event in events {
            *counts.entry(event).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }

    /// Distinct events, in order of first occurrence
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.counts.keys()
    }

    /// (event, count) pairs, in order of first occurrence
    pub fn iter(&self) -> impl Iterator<Item = (&Event, usize)> {
        self.counts.iter().map(|(e, c)| (e, *c))
    }

    /// Number of distinct events
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of events counted
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn absolute_frequency(&self, event: &Event) -> usize {
        self.counts.get(event).copied().unwrap_or(0)
    }

    /// count / total events in this histogram
    pub fn relative_frequency(&self, event: &Event) -> f64 {
        stats::relative_frequency(self.absolute_frequency(event), self.total)
    }

    /// Relative frequency against a comparison vocabulary of `vocabulary`
    /// distinct events; unseen events score 0.0.
    pub fn normalized_frequency(&self, event: &Event, vocabulary: usize) -> f64 {
        stats::normalized_frequency(self.relative_frequency(event), vocabulary)
    }

    /// Events sorted by descending count, ties in first-occurrence order
    pub fn most_common(&self) -> Vec<(&Event, usize)> {
        let mut ranked: Vec<(&Event, usize)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Union of the events observed in `histograms`, first-occurrence order
pub fn event_union<'a>(histograms: impl IntoIterator<Item = &'a EventHistogram>) -> IndexSet<Event> {
    let mut union = IndexSet::new();
    for histogram in histograms {
        union.extend(histogram.events().cloned());
    }
    union
}
