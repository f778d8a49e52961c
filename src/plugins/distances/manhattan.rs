use super::aligned_frequencies;
use crate::error::DistanceCalculationError;
use crate::models::EventSet;
use crate::plugins::{DistanceFunction, Plugin};

/// Sum of absolute relative-frequency differences
pub struct ManhattanDistance;

impl Plugin for ManhattanDistance {
    fn display_name(&self) -> &str {
        "Manhattan Distance"
    }

    fn tooltip(&self) -> &str {
        "Manhattan Distance (L1 norm)"
    }
}

impl DistanceFunction for ManhattanDistance {
    fn distance(
        &self,
        unknown: &EventSet,
        known: &EventSet,
    ) -> Result<f64, DistanceCalculationError> {
        if unknown.is_empty() && known.is_empty() {
            return Err(DistanceCalculationError::new(
                self.display_name(),
                "both event sets are empty",
            ));
        }
        let (u, k) = aligned_frequencies(unknown, known);
        Ok(u.iter().zip(&k).map(|(a, b)| (a - b).abs()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::counts;
    use super::*;

    #[test]
    fn test_manhattan() {
        let a = counts("a", &[("a", 3), ("b", 1)]);
        let b = counts("b", &[("a", 2), ("b", 2)]);
        let d = ManhattanDistance.distance(&a, &b).unwrap();
        assert!((d - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty() {
        let e = counts("e", &[]);
        assert!(ManhattanDistance.distance(&e, &e).is_err());
    }
}
