//! `folio import <file>`: load catalog content.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use folio_infra::import::read_catalog_file;

use crate::state::AppState;

pub async fn import_catalog(state: &AppState, path: &Path, json: bool) -> Result<()> {
    let file = read_catalog_file(path).await?;
    let summary = state
        .portfolio_service
        .import(&file)
        .await
        .with_context(|| format!("importing {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Section").fg(Color::White),
        Cell::new("Written").fg(Color::White),
    ]);
    let site = if summary.site_updated { "updated" } else { "unchanged" };
    table.add_row(vec![Cell::new("Site"), Cell::new(site)]);
    for (section, count) in [
        ("Skills", summary.skills),
        ("Projects", summary.projects),
        ("Case studies", summary.case_studies),
        ("Gigs", summary.gigs),
        ("Knowledge entries", summary.knowledge_entries),
    ] {
        table.add_row(vec![Cell::new(section), Cell::new(count)]);
    }

    println!();
    println!(
        "  {} Imported {}",
        style("✓").green().bold(),
        style(path.display()).cyan()
    );
    println!("{table}");
    println!();
    Ok(())
}
