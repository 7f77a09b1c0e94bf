//! List the capability catalog

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use verdant_core::{
    CATALOG_VERSION, LEGACY_ALIASES, all_capabilities, allowed_roles, introduced_in,
};

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,

    /// Also list legacy aliases
    #[arg(long)]
    pub aliases: bool,
}

pub fn run(args: CatalogArgs) -> Result<()> {
    if args.json {
        let keys: Vec<&str> = all_capabilities().iter().map(|c| c.as_str()).collect();
        let body = serde_json::json!({
            "version": CATALOG_VERSION,
            "capabilities": keys,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Capability").fg(Color::Cyan),
        Cell::new("Domain").fg(Color::Cyan),
        Cell::new("Plan").fg(Color::Cyan),
        Cell::new("Roles").fg(Color::Cyan),
    ]);

    for capability in all_capabilities() {
        let roles = capability
            .as_facility()
            .and_then(allowed_roles)
            .map(|roles| {
                roles
                    .iter()
                    .map(|r| r.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(capability.as_str()),
            Cell::new(capability.domain().prefix()),
            Cell::new(introduced_in(*capability).as_str()),
            Cell::new(roles),
        ]);
    }

    println!("Catalog version {}", CATALOG_VERSION);
    println!("{table}");

    if args.aliases {
        let mut aliases = Table::new();
        aliases.load_preset(UTF8_FULL_CONDENSED);
        aliases.set_header(vec![
            Cell::new("Legacy key").fg(Color::Cyan),
            Cell::new("Capability").fg(Color::Cyan),
        ]);
        for (legacy, capability) in LEGACY_ALIASES {
            aliases.add_row(vec![Cell::new(*legacy), Cell::new(capability.as_str())]);
        }
        println!("{aliases}");
    }

    Ok(())
}
