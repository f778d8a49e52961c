//! Registration table: unit name → factory
//!
//! Discovery resolves every unit it lists through this table instead of
//! resolving types at runtime. Built-in plugins register themselves in
//! [`crate::plugins::register_builtin`]; callers may add more with
//! [`RegistrationTable::register`] before building a registry.

use super::lister::ArchiveLister;
use crate::error::PluginError;
use crate::plugins::{AnyPlugin, Capability, PluginParameters};
use indexmap::IndexMap;
use tracing::debug;

/// File extension marking a plugin unit at a search location
pub const UNIT_EXTENSION: &str = "plugin";

/// Builds a plugin instance from its parameters.
///
/// The table is the one being discovered, so a factory can resolve the
/// other units it depends on, including units registered by callers.
pub type Factory = fn(&PluginParameters, &RegistrationTable) -> Result<AnyPlugin, PluginError>;

/// One registered unit
#[derive(Clone)]
pub struct Registration {
    /// Unit name, e.g. "soergel_distance"
    pub unit: String,
    /// Capability the unit is packaged under in the built-in bundle
    pub capability: Capability,
    pub factory: Factory,
}

impl Registration {
    pub fn instantiate(
        &self,
        parameters: &PluginParameters,
        table: &RegistrationTable,
    ) -> Result<AnyPlugin, PluginError> {
        (self.factory)(parameters, table)
    }
}

/// Registered units, in registration order
#[derive(Clone, Default)]
pub struct RegistrationTable {
    entries: IndexMap<String, Registration>,
}

impl RegistrationTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding every built-in plugin
    pub fn builtin() -> Self {
        let mut table = Self::new();
        crate::plugins::register_builtin(&mut table);
        table
    }

    /// Register (or replace) a unit
    pub fn register(
        &mut self,
        capability: Capability,
        unit: impl Into<String>,
        factory: Factory,
    ) -> &mut Self {
        let unit = unit.into();
        let registration = Registration {
            unit: unit.clone(),
            capability,
            factory,
        };
        if self.entries.insert(unit.clone(), registration).is_some() {
            debug!("Replaced registration for {}", unit);
        }
        self
    }

    pub fn resolve(&self, unit: &str) -> Option<&Registration> {
        self.entries.get(unit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unit names packaged under `capability`
    pub fn units(&self, capability: Capability) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(move |r| r.capability == capability)
            .map(|r| r.unit.as_str())
    }

    /// The compiled-in bundle: one `<path>/<unit>.plugin` entry per unit
    pub fn bundle(&self) -> ArchiveLister {
        let mut entries: Vec<String> = Capability::ALL
            .iter()
            .map(|c| format!("{}/", c.path()))
            .collect();
        entries.extend(self.entries.values().map(|r| {
            format!("{}/{}.{}", r.capability.path(), r.unit, UNIT_EXTENSION)
        }));
        ArchiveLister::from_entries("<builtin>", entries)
    }
}

/// Unit name of a listed child, `None` for anything that is not a unit
pub fn unit_name(child: &str) -> Option<&str> {
    child
        .strip_suffix(UNIT_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .filter(|s| !s.is_empty())
}
