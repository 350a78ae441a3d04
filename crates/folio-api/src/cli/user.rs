//! `folio create-user`: register a user and mint their first bearer token.

use anyhow::Result;
use console::style;

use crate::state::AppState;

pub async fn create_user(
    state: &AppState,
    email: &str,
    name: &str,
    staff: bool,
    json: bool,
) -> Result<()> {
    let (user, token) = state
        .account_service
        .create_user(email, name, staff)
        .await?;

    if json {
        let out = serde_json::json!({
            "id": user.id,
            "email": user.email,
            "display_name": user.display_name,
            "is_staff": user.is_staff,
            "token": token,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Created user {} ({})",
        style("✓").green().bold(),
        style(&user.display_name).bold(),
        user.email
    );
    if user.is_staff {
        println!("  {}", style("staff access granted").dim());
    }
    println!();
    println!(
        "  {} Bearer token (save this -- it won't be shown again):",
        style("🔑").bold()
    );
    println!();
    println!("  {}", style(&token).yellow().bold());
    println!();
    Ok(())
}
