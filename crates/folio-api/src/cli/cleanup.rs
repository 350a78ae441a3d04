//! `folio cleanup`: retention sweep over analytics and anonymous chats.

use anyhow::Result;
use console::style;

use crate::state::AppState;

pub async fn cleanup(state: &AppState, days: u32, dry_run: bool, json: bool) -> Result<()> {
    let report = state.cleanup_service.cleanup(days, dry_run).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let verb = if dry_run { "Would delete" } else { "Deleted" };
    println!();
    println!(
        "  {} data older than {} ({} days)",
        style(verb).bold(),
        style(report.cutoff.format("%Y-%m-%d %H:%M UTC")).cyan(),
        days
    );
    println!("  Analytics events:   {}", style(report.analytics_events).bold());
    println!("  Anonymous sessions: {}", style(report.chat_sessions).bold());
    if dry_run {
        println!("  {}", style("Dry run: nothing was deleted").dim());
    }
    println!();
    Ok(())
}
