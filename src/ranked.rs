//! Ranked (label, score) results
//!
//! A [`RankedPair`] carries the comparator that orders it. The comparator is
//! chosen at construction and cannot change, so a result list sorts the same
//! way everywhere it is consumed.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Ordering policy over scores
pub type ScoreComparator<S> = fn(&S, &S) -> Ordering;

/// Compare raw values (total order, NaN sorts last)
pub fn by_value(a: &f64, b: &f64) -> Ordering {
    a.total_cmp(b)
}

/// Compare absolute values
pub fn by_magnitude(a: &f64, b: &f64) -> Ordering {
    a.abs().total_cmp(&b.abs())
}

/// A label and its score, ordered by a fixed comparator
#[derive(Clone)]
pub struct RankedPair<L, S = f64> {
    label: L,
    score: S,
    comparator: ScoreComparator<S>,
}

impl<L, S> RankedPair<L, S> {
    pub fn new(label: L, score: S, comparator: ScoreComparator<S>) -> Self {
        Self {
            label,
            score,
            comparator,
        }
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn score(&self) -> &S {
        &self.score
    }

    pub fn into_parts(self) -> (L, S) {
        (self.label, self.score)
    }

    /// Order against another pair using this pair's comparator
    pub fn compare(&self, other: &Self) -> Ordering {
        (self.comparator)(&self.score, &other.score)
    }
}

impl<L> RankedPair<L, f64> {
    /// Pair ordered by raw score
    pub fn by_value(label: L, score: f64) -> Self {
        Self::new(label, score, by_value)
    }

    /// Pair ordered by absolute score
    pub fn by_magnitude(label: L, score: f64) -> Self {
        Self::new(label, score, by_magnitude)
    }
}

impl<L: fmt::Debug, S: fmt::Debug> fmt::Debug for RankedPair<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RankedPair")
            .field(&self.label)
            .field(&self.score)
            .finish()
    }
}

impl<L: fmt::Display, S: fmt::Display> fmt::Display for RankedPair<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.label, self.score)
    }
}

impl<L: PartialEq, S> PartialEq for RankedPair<L, S> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.compare(other) == Ordering::Equal
    }
}

impl<L: Serialize, S: Serialize> Serialize for RankedPair<L, S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("RankedPair", 2)?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("score", &self.score)?;
        state.end()
    }
}

/// Sort ascending; equal scores keep their insertion order
pub fn rank_ascending<L, S>(pairs: &mut [RankedPair<L, S>]) {
    pairs.sort_by(|a, b| a.compare(b));
}

/// Sort descending; equal scores keep their insertion order
pub fn rank_descending<L, S>(pairs: &mut [RankedPair<L, S>]) {
    pairs.sort_by(|a, b| b.compare(a));
}
