use super::aligned_frequencies;
use crate::error::DistanceCalculationError;
use crate::models::EventSet;
use crate::plugins::{DistanceFunction, Plugin};

/// Soergel distance: Σ|u - k| / Σ max(u, k) over relative frequencies
///
/// Symmetric, in [0, 1], and zero exactly when both histograms agree on
/// every observed event.
pub struct SoergelDistance;

impl Plugin for SoergelDistance {
    fn display_name(&self) -> &str {
        "Soergel Distance"
    }

    fn tooltip(&self) -> &str {
        "Soergel Distance, a normalized magnitude ratio"
    }

    fn show_in_gui(&self) -> bool {
        false
    }
}

impl DistanceFunction for SoergelDistance {
    fn distance(
        &self,
        unknown: &EventSet,
        known: &EventSet,
    ) -> Result<f64, DistanceCalculationError> {
        let (u, k) = aligned_frequencies(unknown, known);

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (ru, rk) in u.iter().zip(&k) {
            numerator += (ru - rk).abs();
            denominator += ru.max(*rk);
        }

        if denominator == 0.0 {
            return Err(DistanceCalculationError::new(
                self.display_name(),
                format!(
                    "no observed events in '{}' or '{}'",
                    unknown.document(),
                    known.document()
                ),
            ));
        }
        Ok(numerator / denominator)
    }
}
