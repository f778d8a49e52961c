//! Analysis drivers

mod nearest_neighbor;
mod pearson_factor;

pub use nearest_neighbor::NearestNeighborDriver;
pub use pearson_factor::PearsonFactorAnalysis;

use crate::error::AnalysisError;
use crate::models::EventSet;

/// Author label of a known set, which training requires
pub(crate) fn required_label(known: &EventSet) -> Result<&str, AnalysisError> {
    known.author().ok_or_else(|| AnalysisError::MissingLabel {
        document: known.document().to_string(),
    })
}
