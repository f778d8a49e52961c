//! Plugin registry and discovery
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Registry                            │
//! │  - RegistrationTable: unit name → Result-returning factory  │
//! │  - ResourceLister: directory, zip archive, built-in bundle  │
//! │  - Catalogue: six sorted lists, built once, then frozen     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  <root>/canonicizers/unify_case.plugin                      │
//! │  <root>/distances/soergel_distance.plugin                   │
//! │  ...   (direct children only, one path per capability)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use authorship::registry::Registry;
//!
//! let registry = Registry::builder().location("plugins/").build()?;
//! for distance in registry.catalogue().distance_functions() {
//!     println!("{} ({})", distance.display_name(), distance.unit());
//! }
//! for diagnostic in registry.catalogue().diagnostics() {
//!     eprintln!("{}", diagnostic);
//! }
//! ```

mod discovery;
mod lister;
mod table;

pub use discovery::{discover, Diagnostic, Discovery};
pub use lister::{open_location, ArchiveLister, DirectoryLister, ResourceLister};
pub use table::{unit_name, Factory, Registration, RegistrationTable, UNIT_EXTENSION};

use crate::config::normalize_plugin_name;
use crate::error::DiscoveryError;
use crate::plugins::{
    by_display_name, AnalysisDriver, AnyPlugin, Canonicizer, Capability, DistanceFunction,
    EventCuller, EventDriver, Language, Plugin, PluginOrder, PluginParameters,
};
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tracing::info;

/// A discovered plugin and the unit it came from
pub struct Registered<T: ?Sized> {
    unit: String,
    plugin: Arc<T>,
}

impl<T: ?Sized> Registered<T> {
    pub fn new(unit: impl Into<String>, plugin: Arc<T>) -> Self {
        Self {
            unit: unit.into(),
            plugin,
        }
    }

    /// Implementation identity (unit name)
    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn plugin(&self) -> &Arc<T> {
        &self.plugin
    }
}

impl<T: ?Sized> Clone for Registered<T> {
    fn clone(&self) -> Self {
        Self {
            unit: self.unit.clone(),
            plugin: Arc::clone(&self.plugin),
        }
    }
}

impl<T: ?Sized> Deref for Registered<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.plugin
    }
}

impl<T: ?Sized> fmt::Debug for Registered<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registered").field("unit", &self.unit).finish()
    }
}

/// Capability record for listings
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PluginInfo {
    pub unit: String,
    pub display_name: String,
    pub tooltip: String,
    pub show_in_gui: bool,
}

/// Frozen snapshot of every capability list
///
/// Built once; no API mutates it afterwards.
#[derive(Default)]
pub struct Catalogue {
    canonicizers: Vec<Registered<dyn Canonicizer>>,
    event_drivers: Vec<Registered<dyn EventDriver>>,
    event_cullers: Vec<Registered<dyn EventCuller>>,
    distance_functions: Vec<Registered<dyn DistanceFunction>>,
    analysis_drivers: Vec<Registered<dyn AnalysisDriver>>,
    languages: Vec<Registered<dyn Language>>,
    records: HashMap<Capability, Vec<PluginInfo>>,
    diagnostics: Vec<Diagnostic>,
}

impl Catalogue {
    /// Discover all six capabilities independently
    pub fn build(
        lister: &dyn ResourceLister,
        table: &RegistrationTable,
        parameters: &HashMap<String, PluginParameters>,
        order: PluginOrder,
    ) -> Self {
        let mut catalogue = Catalogue::default();

        for capability in Capability::ALL {
            let found = discover(capability, lister, table, parameters, order);
            catalogue.diagnostics.extend(found.diagnostics);

            let records = found
                .instances
                .iter()
                .map(|(unit, p)| PluginInfo {
                    unit: unit.clone(),
                    display_name: p.display_name().to_string(),
                    tooltip: p.tooltip().to_string(),
                    show_in_gui: p.show_in_gui(),
                })
                .collect();
            catalogue.records.insert(capability, records);

            for (unit, plugin) in found.instances {
                match plugin {
                    AnyPlugin::Canonicizer(p) => catalogue.canonicizers.push(Registered::new(unit, p)),
                    AnyPlugin::EventDriver(p) => catalogue.event_drivers.push(Registered::new(unit, p)),
                    AnyPlugin::EventCuller(p) => catalogue.event_cullers.push(Registered::new(unit, p)),
                    AnyPlugin::DistanceFunction(p) => {
                        catalogue.distance_functions.push(Registered::new(unit, p))
                    }
                    AnyPlugin::AnalysisDriver(p) => {
                        catalogue.analysis_drivers.push(Registered::new(unit, p))
                    }
                    AnyPlugin::Language(p) => catalogue.languages.push(Registered::new(unit, p)),
                }
            }
        }

        info!(
            "Plugin catalogue from {}: {} plugins, {} diagnostics",
            lister.location(),
            catalogue.len(),
            catalogue.diagnostics.len()
        );
        catalogue
    }

    pub fn canonicizers(&self) -> &[Registered<dyn Canonicizer>] {
        &self.canonicizers
    }

    pub fn event_drivers(&self) -> &[Registered<dyn EventDriver>] {
        &self.event_drivers
    }

    pub fn event_cullers(&self) -> &[Registered<dyn EventCuller>] {
        &self.event_cullers
    }

    pub fn distance_functions(&self) -> &[Registered<dyn DistanceFunction>] {
        &self.distance_functions
    }

    pub fn analysis_drivers(&self) -> &[Registered<dyn AnalysisDriver>] {
        &self.analysis_drivers
    }

    pub fn languages(&self) -> &[Registered<dyn Language>] {
        &self.languages
    }

    /// Listing records of one capability, in catalogue order
    pub fn records(&self, capability: Capability) -> &[PluginInfo] {
        self.records.get(&capability).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Failures met while building the catalogue
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Total number of plugins across capabilities
    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_canonicizer(&self, selector: &str) -> Option<&Registered<dyn Canonicizer>> {
        find(&self.canonicizers, selector)
    }

    pub fn find_event_driver(&self, selector: &str) -> Option<&Registered<dyn EventDriver>> {
        find(&self.event_drivers, selector)
    }

    pub fn find_event_culler(&self, selector: &str) -> Option<&Registered<dyn EventCuller>> {
        find(&self.event_cullers, selector)
    }

    pub fn find_distance_function(
        &self,
        selector: &str,
    ) -> Option<&Registered<dyn DistanceFunction>> {
        find(&self.distance_functions, selector)
    }

    pub fn find_analysis_driver(&self, selector: &str) -> Option<&Registered<dyn AnalysisDriver>> {
        find(&self.analysis_drivers, selector)
    }

    pub fn find_language(&self, selector: &str) -> Option<&Registered<dyn Language>> {
        find(&self.languages, selector)
    }
}

/// Match a selector against unit names and display names, format-insensitive
fn find<'a, T: Plugin + ?Sized>(
    list: &'a [Registered<T>],
    selector: &str,
) -> Option<&'a Registered<T>> {
    let wanted = normalize_plugin_name(selector);
    list.iter().find(|r| {
        normalize_plugin_name(r.unit()) == wanted
            || normalize_plugin_name(r.display_name()) == wanted
    })
}

/// Registration table + search location, with a lazily built catalogue
pub struct Registry {
    table: RegistrationTable,
    lister: Box<dyn ResourceLister>,
    parameters: HashMap<String, PluginParameters>,
    order: PluginOrder,
    catalogue: OnceLock<Catalogue>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The frozen catalogue, discovered on first call
    pub fn catalogue(&self) -> &Catalogue {
        self.catalogue.get_or_init(|| {
            Catalogue::build(self.lister.as_ref(), &self.table, &self.parameters, self.order)
        })
    }

    pub fn table(&self) -> &RegistrationTable {
        &self.table
    }

    /// Where units are listed from
    pub fn location(&self) -> String {
        self.lister.location()
    }
}

/// Builder for [`Registry`]
#[derive(Default)]
pub struct RegistryBuilder {
    table: Option<RegistrationTable>,
    location: Option<PathBuf>,
    lister: Option<Box<dyn ResourceLister>>,
    parameters: HashMap<String, PluginParameters>,
    order: Option<PluginOrder>,
}

impl RegistryBuilder {
    /// Replace the built-in registration table
    pub fn table(mut self, table: RegistrationTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Search a directory or zip archive instead of the built-in bundle
    pub fn location(mut self, root: impl Into<PathBuf>) -> Self {
        self.location = Some(root.into());
        self
    }

    /// Search with a custom lister
    pub fn lister(mut self, lister: Box<dyn ResourceLister>) -> Self {
        self.lister = Some(lister);
        self
    }

    /// Factory parameters for one unit
    pub fn parameters(mut self, unit: impl Into<String>, parameters: PluginParameters) -> Self {
        self.parameters.insert(unit.into(), parameters);
        self
    }

    /// Factory parameters for many units
    pub fn all_parameters(mut self, parameters: HashMap<String, PluginParameters>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Sort order for every capability list (default: display name)
    pub fn order(mut self, order: PluginOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Fails only when the location is a file that is not a readable archive
    pub fn build(self) -> Result<Registry, DiscoveryError> {
        let table = self.table.unwrap_or_else(RegistrationTable::builtin);
        let lister = match (self.lister, self.location) {
            (Some(lister), _) => lister,
            (None, Some(root)) => open_location(&root)?,
            (None, None) => Box::new(table.bundle()),
        };

        Ok(Registry {
            table,
            lister,
            parameters: self.parameters,
            order: self.order.unwrap_or(by_display_name),
            catalogue: OnceLock::new(),
        })
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Install the process-wide registry.
///
/// Must happen before the first call to [`global`]; afterwards the
/// registry is returned unchanged as the error.
pub fn install(registry: Registry) -> Result<(), Registry> {
    GLOBAL.set(registry)
}

/// Process-wide registry; the built-in bundle unless [`install`] ran first
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(|| {
        let table = RegistrationTable::builtin();
        let lister = Box::new(table.bundle());
        Registry {
            table,
            lister,
            parameters: HashMap::new(),
            order: by_display_name,
            catalogue: OnceLock::new(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue_is_complete() {
        let registry = Registry::builder().build().unwrap();
        let catalogue = registry.catalogue();

        assert!(catalogue.diagnostics().is_empty());
        assert_eq!(catalogue.len(), registry.table().len());
        for capability in Capability::ALL {
            assert!(!catalogue.records(capability).is_empty(), "{}", capability);
        }
    }

    #[test]
    fn test_catalogue_is_computed_once() {
        let registry = Registry::builder().build().unwrap();
        let first = registry.catalogue() as *const Catalogue;
        let second = registry.catalogue() as *const Catalogue;
        assert_eq!(first, second);
    }

    #[test]
    fn test_lists_are_sorted_by_display_name() {
        let registry = Registry::builder().build().unwrap();
        for capability in Capability::ALL {
            let names: Vec<&str> = registry
                .catalogue()
                .records(capability)
                .iter()
                .map(|r| r.display_name.as_str())
                .collect();
            let mut sorted = names.clone();
            sorted.sort();
            assert_eq!(names, sorted);
        }
    }

    #[test]
    fn test_find_by_unit_or_display_name() {
        let registry = Registry::builder().build().unwrap();
        let catalogue = registry.catalogue();

        let by_unit = catalogue.find_distance_function("soergel_distance").unwrap();
        let by_name = catalogue.find_distance_function("Soergel Distance").unwrap();
        assert_eq!(by_unit.unit(), by_name.unit());
        assert!(catalogue.find_distance_function("no such distance").is_none());
    }

    #[test]
    fn test_custom_order() {
        fn reverse(a: &AnyPlugin, b: &AnyPlugin) -> std::cmp::Ordering {
            b.display_name().cmp(a.display_name())
        }

        let registry = Registry::builder().order(reverse).build().unwrap();
        let names: Vec<&str> = registry
            .catalogue()
            .distance_functions()
            .iter()
            .map(|d| d.display_name())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.reverse();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_global_registry_is_shared() {
        let a = global() as *const Registry;
        let b = global() as *const Registry;
        assert_eq!(a, b);
        assert!(!global().catalogue().is_empty());
    }
}
