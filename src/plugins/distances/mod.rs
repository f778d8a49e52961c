//! Histogram distance functions
//!
//! Each function compares the relative-frequency histograms of two event
//! sets over the union of their observed events.

mod cosine;
mod manhattan;
mod soergel;

pub use cosine::CosineDistance;
pub use manhattan::ManhattanDistance;
pub use soergel::SoergelDistance;

use crate::histogram::{event_union, EventHistogram};
use crate::models::EventSet;

/// Relative frequencies of both sets, aligned over their event union.
///
/// The union is visited in event order, so swapping the arguments swaps
/// the two vectors and nothing else: sums over them come out bit-identical.
pub(crate) fn aligned_frequencies(unknown: &EventSet, known: &EventSet) -> (Vec<f64>, Vec<f64>) {
    let hu = EventHistogram::from_event_set(unknown);
    let hk = EventHistogram::from_event_set(known);
    let mut union = event_union([&hu, &hk]);
    union.sort();
    union
        .iter()
        .map(|e| (hu.relative_frequency(e), hk.relative_frequency(e)))
        .unzip()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Event, EventSet};

    /// Event set from (event, count) pairs
    pub fn counts(doc: &str, counts: &[(&str, usize)]) -> EventSet {
        let events = counts
            .iter()
            .flat_map(|(e, n)| std::iter::repeat(Event::new(e)).take(*n))
            .collect();
        EventSet::new(doc, events)
    }
}
