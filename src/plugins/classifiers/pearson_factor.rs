//! Correlation-based feature ranking
//!
//! Knowns carry a continuous trait score as their author label. Training
//! correlates each event's normalized frequency with that score across
//! the knowns and ranks events by |r|. The ranking is the whole output:
//! the trained model does not score unknown documents.

use super::required_label;
use crate::error::AnalysisError;
use crate::histogram::{event_union, EventHistogram};
use crate::models::EventSet;
use crate::plugins::{AnalysisDriver, Plugin, TrainedModel, TrainingReport};
use crate::ranked::{rank_descending, RankedPair};
use crate::stats::{self, Degeneracy};
use tracing::debug;

pub struct PearsonFactorAnalysis;

impl Plugin for PearsonFactorAnalysis {
    fn display_name(&self) -> &str {
        "Personality Pearson Factor Analysis"
    }

    fn tooltip(&self) -> &str {
        "Ranks events by their correlation with a numeric personality score"
    }
}

fn parse_labels(knowns: &[EventSet]) -> Result<Vec<f64>, AnalysisError> {
    knowns
        .iter()
        .map(|known| {
            let label = required_label(known)?;
            match label.trim().parse::<f64>() {
                Ok(score) if score.is_finite() => Ok(score),
                _ => Err(AnalysisError::LabelParse {
                    document: known.document().to_string(),
                    label: label.to_string(),
                }),
            }
        })
        .collect()
}

impl AnalysisDriver for PearsonFactorAnalysis {
    fn train(&self, knowns: &[EventSet]) -> Result<Box<dyn TrainedModel>, AnalysisError> {
        if knowns.is_empty() {
            return Err(AnalysisError::EmptyTrainingSet);
        }
        let labels = parse_labels(knowns)?;

        if labels.len() < 2 {
            return Err(AnalysisError::StatisticalDegeneracy(format!(
                "correlation needs at least two knowns, got {}",
                labels.len()
            )));
        }
        if stats::is_constant(&labels) {
            return Err(AnalysisError::StatisticalDegeneracy(
                "every known has the same score".to_string(),
            ));
        }

        let histograms: Vec<EventHistogram> = knowns.iter().map(EventSet::histogram).collect();
        let vocabulary = event_union(&histograms);

        let mut report = TrainingReport::default();
        for event in &vocabulary {
            let frequencies: Vec<f64> = histograms
                .iter()
                .map(|h| h.normalized_frequency(event, vocabulary.len()))
                .collect();

            match stats::pearson(&frequencies, &labels) {
                Ok(r) => {
                    debug!("{}: r = {:.4}", event, r);
                    report
                        .ranking
                        .push(RankedPair::by_magnitude(event.to_string(), r));
                }
                Err(Degeneracy::ConstantX) => {
                    debug!("{}: constant frequency, correlation undefined", event);
                    report.undefined.push(event.to_string());
                }
                Err(other) => {
                    return Err(AnalysisError::StatisticalDegeneracy(format!(
                        "{}: {:?}",
                        event, other
                    )))
                }
            }
        }

        rank_descending(&mut report.ranking);
        debug!(
            "Ranked {} events, {} undefined",
            report.ranking.len(),
            report.undefined.len()
        );
        Ok(Box::new(FactorModel { report }))
    }
}

struct FactorModel {
    report: TrainingReport,
}

impl TrainedModel for FactorModel {
    fn analyze(&self, _unknown: &EventSet) -> Result<Vec<RankedPair<String>>, AnalysisError> {
        Ok(Vec::new())
    }

    fn report(&self) -> Option<&TrainingReport> {
        Some(&self.report)
    }
}
