use super::required_label;
use crate::config::normalize_plugin_name;
use crate::error::{AnalysisError, PluginError};
use crate::models::EventSet;
use crate::plugins::{
    AnalysisDriver, AnyPlugin, Capability, DistanceFunction, Plugin, PluginParameters,
    TrainedModel,
};
use crate::ranked::{rank_ascending, RankedPair};
use crate::registry::RegistrationTable;
use std::sync::Arc;
use tracing::warn;

/// Ranks known authors by ascending distance to the unknown
pub struct NearestNeighborDriver {
    distance: Arc<dyn DistanceFunction>,
    tooltip: String,
}

impl NearestNeighborDriver {
    pub const DEFAULT_DISTANCE: &'static str = "soergel_distance";

    pub fn new(distance: Arc<dyn DistanceFunction>) -> Self {
        let tooltip = format!("Nearest neighbor using {}", distance.display_name());
        Self { distance, tooltip }
    }

    /// Reads `distance`, a distance unit in `table` (default Soergel)
    pub fn from_parameters(
        params: &PluginParameters,
        table: &RegistrationTable,
    ) -> Result<Self, PluginError> {
        let selector = params.string_or("distance", Self::DEFAULT_DISTANCE)?;
        let wanted = normalize_plugin_name(selector);

        let registration = table
            .units(Capability::DistanceFunction)
            .find(|unit| normalize_plugin_name(unit) == wanted)
            .and_then(|unit| table.resolve(unit))
            .ok_or_else(|| PluginError::InvalidParameter {
                name: "distance".to_string(),
                reason: format!("no distance function named '{}'", selector),
            })?;

        match registration.instantiate(&PluginParameters::default(), table)? {
            AnyPlugin::DistanceFunction(distance) => Ok(Self::new(distance)),
            other => Err(PluginError::InvalidParameter {
                name: "distance".to_string(),
                reason: format!("'{}' is a {}", selector, other.capability()),
            }),
        }
    }
}

impl Plugin for NearestNeighborDriver {
    fn display_name(&self) -> &str {
        "Nearest Neighbor Driver"
    }

    fn tooltip(&self) -> &str {
        &self.tooltip
    }
}

impl AnalysisDriver for NearestNeighborDriver {
    fn train(&self, knowns: &[EventSet]) -> Result<Box<dyn TrainedModel>, AnalysisError> {
        if knowns.is_empty() {
            return Err(AnalysisError::EmptyTrainingSet);
        }
        for known in knowns {
            required_label(known)?;
        }
        Ok(Box::new(NeighborModel {
            distance: Arc::clone(&self.distance),
            knowns: knowns.to_vec(),
        }))
    }
}

struct NeighborModel {
    distance: Arc<dyn DistanceFunction>,
    knowns: Vec<EventSet>,
}

impl TrainedModel for NeighborModel {
    /// One pair per known, closest first
    ///
    /// A known whose distance cannot be computed is skipped; the call fails
    /// only when no known could be scored.
    fn analyze(&self, unknown: &EventSet) -> Result<Vec<RankedPair<String>>, AnalysisError> {
        let mut ranking = Vec::with_capacity(self.knowns.len());
        let mut first_error = None;

        for known in &self.knowns {
            match self.distance.distance(unknown, known) {
                Ok(d) => {
                    let label = known.author().unwrap_or(known.document()).to_string();
                    ranking.push(RankedPair::by_value(label, d));
                }
                Err(source) => {
                    let error = AnalysisError::Distance {
                        unknown: unknown.document().to_string(),
                        known: known.document().to_string(),
                        source,
                    };
                    warn!("{}", error);
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }

        match first_error {
            Some(error) if ranking.is_empty() => Err(error),
            _ => {
                rank_ascending(&mut ranking);
                Ok(ranking)
            }
        }
    }
}
