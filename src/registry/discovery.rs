//! Capability discovery
//!
//! For one capability: list the direct children of its path, resolve each
//! unit through the registration table, instantiate it, keep it if it
//! implements the capability, then sort. Every failure becomes a
//! [`Diagnostic`] and discovery moves on to the next unit.

use super::lister::ResourceLister;
use super::table::{unit_name, RegistrationTable};
use crate::error::DiscoveryError;
use crate::plugins::{AnyPlugin, Capability, PluginOrder, PluginParameters};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// One discovery failure, advisory only
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Capability being discovered
    pub capability: Capability,
    pub error: DiscoveryError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.capability, self.error)
    }
}

/// Outcome of discovering one capability
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// (unit name, instance), sorted
    pub instances: Vec<(String, AnyPlugin)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Discover every instantiable unit of `capability` visible to `lister`.
///
/// `parameters` is keyed by unit name; units without an entry get empty
/// parameters. Sorting is stable, so units comparing equal under `order`
/// keep their listing order.
pub fn discover(
    capability: Capability,
    lister: &dyn ResourceLister,
    table: &RegistrationTable,
    parameters: &HashMap<String, PluginParameters>,
    order: PluginOrder,
) -> Discovery {
    let mut discovery = Discovery::default();
    let report = |error: DiscoveryError| {
        let diagnostic = Diagnostic { capability, error };
        warn!("{}", diagnostic);
        diagnostic
    };

    let children = match lister.list(capability.path()) {
        Ok(children) => children,
        Err(e) => {
            discovery.diagnostics.push(report(e));
            return discovery;
        }
    };

    let defaults = PluginParameters::default();
    for child in &children {
        let Some(unit) = unit_name(child) else {
            continue;
        };

        let Some(registration) = table.resolve(unit) else {
            discovery.diagnostics.push(report(DiscoveryError::Unresolved {
                unit: unit.to_string(),
            }));
            continue;
        };

        let params = parameters.get(unit).unwrap_or(&defaults);
        let plugin = match registration.instantiate(params, table) {
            Ok(plugin) => plugin,
            Err(source) => {
                discovery.diagnostics.push(report(DiscoveryError::Instantiation {
                    unit: unit.to_string(),
                    source,
                }));
                continue;
            }
        };

        if plugin.capability() != capability {
            discovery.diagnostics.push(report(DiscoveryError::CapabilityMismatch {
                unit: unit.to_string(),
                expected: capability.name(),
                found: plugin.capability().name(),
            }));
            continue;
        }

        debug!("Discovered {} '{}' ({})", capability, plugin.display_name(), unit);
        discovery.instances.push((unit.to_string(), plugin));
    }

    discovery.instances.sort_by(|a, b| order(&a.1, &b.1));
    discovery
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluginError;
    use crate::plugins::by_display_name;
    use crate::registry::ArchiveLister;

    fn table() -> RegistrationTable {
        let mut table = RegistrationTable::builtin();
        table.register(Capability::DistanceFunction, "broken_distance", |_, _| {
            Err(PluginError::Unavailable("missing resources".into()))
        });
        table
    }

    #[test]
    fn test_one_valid_one_mismatch_one_broken() {
        let lister = ArchiveLister::from_entries(
            "test",
            [
                "distances/soergel_distance.plugin",
                "distances/unify_case.plugin",
                "distances/broken_distance.plugin",
            ],
        );

        let found = discover(
            Capability::DistanceFunction,
            &lister,
            &table(),
            &HashMap::new(),
            by_display_name,
        );

        assert_eq!(found.instances.len(), 1);
        assert_eq!(found.instances[0].0, "soergel_distance");
        assert_eq!(found.diagnostics.len(), 2);
        assert!(found.diagnostics.iter().any(|d| matches!(
            d.error,
            DiscoveryError::CapabilityMismatch { .. }
        )));
        assert!(found.diagnostics.iter().any(|d| matches!(
            d.error,
            DiscoveryError::Instantiation { .. }
        )));
    }

    #[test]
    fn test_unresolved_and_non_units() {
        let lister = ArchiveLister::from_entries(
            "test",
            [
                "distances/no_such_thing.plugin",
                "distances/README.md",
                "distances/cosine_distance.plugin",
            ],
        );

        let found = discover(
            Capability::DistanceFunction,
            &lister,
            &table(),
            &HashMap::new(),
            by_display_name,
        );

        assert_eq!(found.instances.len(), 1);
        assert_eq!(found.diagnostics.len(), 1);
        assert!(matches!(
            found.diagnostics[0].error,
            DiscoveryError::Unresolved { .. }
        ));
    }

    #[test]
    fn test_sorted_by_display_name() {
        let lister = ArchiveLister::from_entries(
            "test",
            [
                "distances/soergel_distance.plugin",
                "distances/manhattan_distance.plugin",
                "distances/cosine_distance.plugin",
            ],
        );

        let found = discover(
            Capability::DistanceFunction,
            &lister,
            &table(),
            &HashMap::new(),
            by_display_name,
        );

        let names: Vec<&str> = found.instances.iter().map(|(_, p)| p.display_name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_missing_location_is_one_diagnostic() {
        let lister = ArchiveLister::from_entries("test", ["canonicizers/unify_case.plugin"]);
        let found = discover(
            Capability::Language,
            &lister,
            &table(),
            &HashMap::new(),
            by_display_name,
        );

        assert!(found.instances.is_empty());
        assert_eq!(found.diagnostics.len(), 1);
        assert!(matches!(
            found.diagnostics[0].error,
            DiscoveryError::Unreadable { .. }
        ));
    }

    #[test]
    fn test_parameters_reach_factories() {
        use crate::plugins::ParameterValue;

        let lister = ArchiveLister::from_entries(
            "test",
            ["event_drivers/character_ngrams.plugin"],
        );
        let mut parameters = HashMap::new();
        parameters.insert(
            "character_ngrams".to_string(),
            PluginParameters::new().with("n", ParameterValue::Integer(0)),
        );

        let found = discover(
            Capability::EventDriver,
            &lister,
            &table(),
            &parameters,
            by_display_name,
        );

        assert!(found.instances.is_empty());
        assert_eq!(found.diagnostics.len(), 1);
    }
}
