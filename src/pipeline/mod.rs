//! Attribution pipeline
//!
//! Orchestrates one run over a set of documents:
//! 1. Canonicize each document's text (in configured order)
//! 2. Extract events with the event driver
//! 3. Cull the whole collection
//! 4. Score: pairwise distances, or train an analysis driver and analyze
//!
//! Steps 1-2 run per document in parallel; each document goes through its
//! stages sequentially.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::{EventGenerationError, PipelineError};
use crate::models::{Document, EventSet};
use crate::plugins::{
    AnalysisDriver, Canonicizer, DistanceFunction, EventCuller, EventDriver, Plugin,
    TrainingReport,
};
use crate::ranked::{rank_ascending, RankedPair};
use crate::registry::{Catalogue, Registered};

/// Stages selected from a catalogue
pub struct Pipeline {
    canonicizers: Vec<Registered<dyn Canonicizer>>,
    event_driver: Registered<dyn EventDriver>,
    event_cullers: Vec<Registered<dyn EventCuller>>,
    distance: Option<Registered<dyn DistanceFunction>>,
    analysis: Option<Registered<dyn AnalysisDriver>>,
}

/// Outcome of [`Pipeline::attribute`]
#[derive(Debug, Clone, Serialize)]
pub struct Attribution {
    pub unknown: String,
    pub driver: String,
    pub ranking: Vec<RankedPair<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<TrainingReport>,
}

/// A known document whose distance could not be computed
#[derive(Debug, Clone, Serialize)]
pub struct PairFailure {
    pub known: String,
    pub reason: String,
}

/// Outcome of [`Pipeline::pairwise_distances`]
#[derive(Debug, Clone, Serialize)]
pub struct DistanceReport {
    pub unknown: String,
    pub distance: String,
    /// (known document, distance), closest first
    pub ranking: Vec<RankedPair<String>>,
    pub failures: Vec<PairFailure>,
}

macro_rules! select {
    ($catalogue:expr, $find:ident, $capability:expr, $selector:expr) => {
        $catalogue
            .$find($selector)
            .cloned()
            .ok_or_else(|| PipelineError::UnknownPlugin {
                capability: $capability,
                selector: $selector.to_string(),
            })
    };
}

impl Pipeline {
    /// Resolve every configured selector against `catalogue`.
    ///
    /// A configured language fills in canonicizers and the event driver
    /// when those are not set explicitly.
    pub fn from_config(catalogue: &Catalogue, config: &PipelineConfig) -> Result<Self, PipelineError> {
        let language = match &config.language {
            Some(selector) => Some(select!(catalogue, find_language, "language", selector)?),
            None => None,
        };

        let canonicizer_selectors: Vec<String> = match (&language, config.canonicizers.is_empty()) {
            (Some(language), true) => language
                .preferred_canonicizers()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            _ => config.canonicizers.clone(),
        };
        let canonicizers = canonicizer_selectors
            .iter()
            .map(|s| select!(catalogue, find_canonicizer, "canonicizer", s))
            .collect::<Result<Vec<_>, _>>()?;

        let driver_selector = config.event_driver.clone().or_else(|| {
            language
                .as_ref()
                .and_then(|l| l.preferred_event_drivers().first())
                .map(|s| s.to_string())
        });
        let event_driver = match driver_selector {
            Some(selector) => select!(catalogue, find_event_driver, "event driver", &selector)?,
            None => return Err(PipelineError::MissingStage("event driver")),
        };

        let event_cullers = config
            .event_cullers
            .iter()
            .map(|s| select!(catalogue, find_event_culler, "event culler", s))
            .collect::<Result<Vec<_>, _>>()?;

        let distance = match &config.distance {
            Some(s) => Some(select!(catalogue, find_distance_function, "distance function", s)?),
            None => None,
        };
        let analysis = match &config.analysis {
            Some(s) => Some(select!(catalogue, find_analysis_driver, "analysis driver", s)?),
            None => None,
        };

        debug!(
            "Pipeline: {} canonicizers, driver {}, {} cullers",
            canonicizers.len(),
            event_driver.unit(),
            event_cullers.len()
        );

        Ok(Self {
            canonicizers,
            event_driver,
            event_cullers,
            distance,
            analysis,
        })
    }

    /// Apply every canonicizer in order
    pub fn canonicize(&self, text: &str) -> String {
        self.canonicizers
            .iter()
            .fold(text.to_string(), |text, c| c.process(&text))
    }

    /// Canonicize and extract one document
    pub fn event_set(&self, document: &Document) -> Result<EventSet, EventGenerationError> {
        let canonical = Document {
            id: document.id.clone(),
            author: document.author.clone(),
            text: self.canonicize(&document.text),
        };
        self.event_driver.create_event_set(&canonical)
    }

    /// Event sets for `documents`, culled as one collection
    ///
    /// Output order matches input order.
    pub fn process(&self, documents: &[Document]) -> Result<Vec<EventSet>, PipelineError> {
        let sets = documents
            .par_iter()
            .map(|d| self.event_set(d))
            .collect::<Result<Vec<_>, _>>()?;

        let sets = self
            .event_cullers
            .iter()
            .fold(sets, |sets, culler| culler.cull(sets));

        info!("Processed {} documents", sets.len());
        Ok(sets)
    }

    /// Train the analysis driver on `knowns` and analyze `unknown`
    pub fn attribute(
        &self,
        knowns: &[Document],
        unknown: &Document,
    ) -> Result<Attribution, PipelineError> {
        let driver = self
            .analysis
            .as_ref()
            .ok_or(PipelineError::MissingStage("analysis driver"))?;

        let (known_sets, unknown_set) = self.process_with_unknown(knowns, unknown)?;
        let model = driver.train(&known_sets)?;
        let ranking = model.analyze(&unknown_set)?;

        Ok(Attribution {
            unknown: unknown.id.clone(),
            driver: driver.display_name().to_string(),
            ranking,
            report: model.report().cloned(),
        })
    }

    /// Train the analysis driver and return its training report
    pub fn train_report(&self, knowns: &[Document]) -> Result<TrainingReport, PipelineError> {
        let driver = self
            .analysis
            .as_ref()
            .ok_or(PipelineError::MissingStage("analysis driver"))?;

        let sets = self.process(knowns)?;
        let model = driver.train(&sets)?;
        Ok(model.report().cloned().unwrap_or_default())
    }

    /// Distance from `unknown` to every known, closest first
    ///
    /// Each pair is scored independently: a failing pair is recorded in
    /// [`DistanceReport::failures`] and the others still complete.
    pub fn pairwise_distances(
        &self,
        unknown: &Document,
        knowns: &[Document],
    ) -> Result<DistanceReport, PipelineError> {
        let distance = self
            .distance
            .as_ref()
            .ok_or(PipelineError::MissingStage("distance function"))?;

        let (known_sets, unknown_set) = self.process_with_unknown(knowns, unknown)?;

        let mut ranking = Vec::new();
        let mut failures = Vec::new();
        for known in &known_sets {
            match distance.distance(&unknown_set, known) {
                Ok(d) => ranking.push(RankedPair::by_value(known.document().to_string(), d)),
                Err(e) => {
                    warn!("{} vs {}: {}", unknown.id, known.document(), e);
                    failures.push(PairFailure {
                        known: known.document().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        rank_ascending(&mut ranking);

        Ok(DistanceReport {
            unknown: unknown.id.clone(),
            distance: distance.display_name().to_string(),
            ranking,
            failures,
        })
    }

    /// Cull knowns and unknown together, then split them apart again
    fn process_with_unknown(
        &self,
        knowns: &[Document],
        unknown: &Document,
    ) -> Result<(Vec<EventSet>, EventSet), PipelineError> {
        let mut documents = knowns.to_vec();
        documents.push(unknown.clone());

        let mut sets = self.process(&documents)?;
        match sets.pop() {
            Some(unknown_set) => Ok((sets, unknown_set)),
            None => Err(PipelineError::MissingStage("unknown document")),
        }
    }
}
