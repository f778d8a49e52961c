use super::aligned_frequencies;
use crate::error::DistanceCalculationError;
use crate::models::EventSet;
use crate::plugins::{DistanceFunction, Plugin};

fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn norm(v: &[f64]) -> f64 {
    dot_product(v, v).sqrt()
}

/// 1 - cosine similarity of the relative-frequency vectors
pub struct CosineDistance;

impl Plugin for CosineDistance {
    fn display_name(&self) -> &str {
        "Cosine Distance"
    }
}

impl DistanceFunction for CosineDistance {
    fn distance(
        &self,
        unknown: &EventSet,
        known: &EventSet,
    ) -> Result<f64, DistanceCalculationError> {
        let (u, k) = aligned_frequencies(unknown, known);
        let norm_u = norm(&u);
        let norm_k = norm(&k);

        if norm_u == 0.0 || norm_k == 0.0 {
            let empty = if norm_u == 0.0 { unknown } else { known };
            return Err(DistanceCalculationError::new(
                self.display_name(),
                format!("'{}' has no events", empty.document()),
            ));
        }

        Ok(1.0 - dot_product(&u, &k) / (norm_u * norm_k))
    }
}
