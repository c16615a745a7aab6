//! Whoami command - show the signed-in user's profile

use anyhow::Result;
use colored::Colorize;

use super::{get_context, require_session};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    require_session(&ctx)?;

    let spinner = output::spinner("Loading profile...");
    let fetched = ctx.auth_service.fetch_profile().await;
    spinner.finish_and_clear();

    // Fall back to the cached profile when the server can't be reached
    let Some(profile) = fetched.or_else(|| ctx.session.profile()) else {
        if !ctx.auth_service.is_authenticated() {
            std::process::exit(1);
        }
        anyhow::bail!("Profile is not available");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.add_row(vec!["Name", profile.name.as_str()]);
    table.add_row(vec!["Email", profile.email.as_str()]);
    if profile.is_confirmed() {
        table.add_row(vec!["ID", profile.uid.as_str()]);
        table.add_row(vec!["Member since", profile.created_at.as_str()]);
    }
    println!("{}", table);

    if !profile.is_confirmed() {
        println!("{}", "Profile details not yet confirmed by the server".dimmed());
    }
    Ok(())
}
