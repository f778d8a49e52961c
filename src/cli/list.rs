//! List command - show the discovered plugin catalogue

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::Session;
use authorship::plugins::Capability;
use authorship::registry::PluginInfo;

#[derive(Serialize)]
struct CapabilityListing<'a> {
    capability: &'static str,
    path: &'static str,
    plugins: Vec<&'a PluginInfo>,
}

#[derive(Serialize)]
struct Listing<'a> {
    location: String,
    capabilities: Vec<CapabilityListing<'a>>,
    diagnostics: Vec<String>,
}

/// Run the list command
pub fn run(session: &Session, all: bool) -> Result<()> {
    let catalogue = session.registry.catalogue();

    let listing = Listing {
        location: session.registry.location(),
        capabilities: Capability::ALL
            .iter()
            .map(|c| CapabilityListing {
                capability: c.name(),
                path: c.path(),
                plugins: catalogue
                    .records(*c)
                    .iter()
                    .filter(|p| all || p.show_in_gui)
                    .collect(),
            })
            .collect(),
        diagnostics: catalogue.diagnostics().iter().map(|d| d.to_string()).collect(),
    };

    if session.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("\nPlugins from {}\n", style(&listing.location).cyan());
    for entry in &listing.capabilities {
        println!("{} ({})", style(entry.capability).bold(), entry.plugins.len());
        for plugin in &entry.plugins {
            println!(
                "  {:<40} {}",
                plugin.display_name,
                style(&plugin.unit).dim()
            );
        }
    }

    if !listing.diagnostics.is_empty() {
        println!("\n{}", style("Diagnostics").yellow().bold());
        for line in &listing.diagnostics {
            println!("  {}", line);
        }
    }
    println!();
    Ok(())
}
