//! Listing plugin units at a search location
//!
//! Discovery is written once against [`ResourceLister`]. Two listers exist:
//! a filesystem directory and a packaged archive whose flat entry namespace
//! is filtered to behave like a directory listing. The compiled-in plugin
//! bundle is an archive lister over in-memory entry paths.

use crate::error::DiscoveryError;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Lists the direct children of a relative path
pub trait ResourceLister: Send + Sync {
    /// Child names (not full paths) directly under `path`, never recursive
    fn list(&self, path: &str) -> Result<Vec<String>, DiscoveryError>;

    /// Human-readable location, for diagnostics
    fn location(&self) -> String;
}

/// Lists a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryLister {
    root: PathBuf,
}

impl DirectoryLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLister for DirectoryLister {
    fn list(&self, path: &str) -> Result<Vec<String>, DiscoveryError> {
        let dir = self.root.join(path);
        let entries = std::fs::read_dir(&dir).map_err(|e| DiscoveryError::Unreadable {
            location: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(child_names(&dir, entries.map(|e| e.map(|entry| entry.file_name()))))
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

/// Sorted child names; unreadable entries are logged and skipped
fn child_names(dir: &Path, entries: impl Iterator<Item = io::Result<OsString>>) -> Vec<String> {
    // read_dir order is platform dependent
    let mut names = BTreeSet::new();
    for entry in entries {
        match entry {
            Ok(name) => {
                names.insert(name.to_string_lossy().into_owned());
            }
            Err(e) => warn!("Skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }
    names.into_iter().collect()
}

/// Lists entries of a packaged archive
#[derive(Debug, Clone)]
pub struct ArchiveLister {
    origin: String,
    entries: Vec<String>,
}

impl ArchiveLister {
    /// Use an explicit set of entry paths
    pub fn from_entries<I, S>(origin: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origin: origin.into(),
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the entry names of a zip archive
    pub fn from_zip(path: &Path) -> Result<Self, DiscoveryError> {
        let unreadable = |reason: String| DiscoveryError::Unreadable {
            location: path.display().to_string(),
            reason,
        };
        let file = File::open(path).map_err(|e| unreadable(e.to_string()))?;
        let archive = zip::ZipArchive::new(file).map_err(|e| unreadable(e.to_string()))?;
        let entries: Vec<String> = archive.file_names().map(String::from).collect();
        debug!("Read {} entries from {}", entries.len(), path.display());

        Ok(Self {
            origin: path.display().to_string(),
            entries,
        })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl ResourceLister for ArchiveLister {
    fn list(&self, path: &str) -> Result<Vec<String>, DiscoveryError> {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let mut found_prefix = false;
        let mut names = BTreeSet::new();

        for entry in &self.entries {
            let Some(rest) = entry.strip_prefix(&prefix) else {
                continue;
            };
            found_prefix = true;
            // direct children only: deeper paths are not part of this listing
            if !rest.is_empty() && !rest.contains('/') {
                names.insert(rest.to_string());
            }
        }

        if !found_prefix {
            return Err(DiscoveryError::Unreadable {
                location: format!("{}!/{}", self.origin, path),
                reason: "no such path in archive".to_string(),
            });
        }
        Ok(names.into_iter().collect())
    }

    fn location(&self) -> String {
        self.origin.clone()
    }
}

/// Pick a lister for a search root: directories are walked, files are read
/// as zip archives. A missing root yields a directory lister whose listings
/// all fail, so each capability reports it independently.
pub fn open_location(root: &Path) -> Result<Box<dyn ResourceLister>, DiscoveryError> {
    if root.is_file() {
        Ok(Box::new(ArchiveLister::from_zip(root)?))
    } else {
        Ok(Box::new(DirectoryLister::new(root)))
    }
}
