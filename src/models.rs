//! Core data models for the attribution pipeline
//!
//! These models flow between pipeline stages: raw [`Document`]s are
//! canonicized and turned into [`EventSet`]s of [`Event`]s, which
//! histograms, distances and analysis drivers consume.

use crate::error::PipelineError;
use crate::histogram::EventHistogram;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Atomic stylistic feature (a token, an n-gram, a character...)
///
/// Identity is the canonical string form; cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(Arc<str>);

impl Event {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Event {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Event {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

/// Ordered events extracted from one document, plus its labels
///
/// Order follows the document; statistics only look at event identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSet {
    document: String,
    #[serde(default)]
    author: Option<String>,
    events: Vec<Event>,
}

impl EventSet {
    pub fn new(document: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            document: document.into(),
            author: None,
            events,
        }
    }

    /// Attach the author label (a name, or a numeric trait score)
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Build a frequency table of this set
    pub fn histogram(&self) -> EventHistogram {
        EventHistogram::from_event_set(self)
    }

    /// A new set with the same labels keeping only events accepted by `keep`
    pub fn retain(&self, mut keep: impl FnMut(&Event) -> bool) -> Self {
        Self {
            document: self.document.clone(),
            author: self.author.clone(),
            events: self.events.iter().filter(|e| keep(e)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EventSet {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// A raw text with its identifier and optional author label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: None,
            text: text.into(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Read a UTF-8 document; the id is the path as given
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.display().to_string(), text))
    }
}
