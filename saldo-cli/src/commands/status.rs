//! Status command - show session state

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use saldo_core::SessionState;

use super::get_local_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_local_context()?;
    let status = ctx.status();

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Session Status".bold());
    println!();

    let state = match status.state {
        SessionState::Authenticated => "signed in".green(),
        SessionState::Expired => "expired".yellow(),
        SessionState::Anonymous => "signed out".dimmed(),
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["State".to_string(), state.to_string()]);
    if let Some(name) = &status.name {
        table.add_row(vec!["Name", name.as_str()]);
    }
    if let Some(email) = &status.email {
        table.add_row(vec!["Email", email.as_str()]);
    }
    if let Some(expires_at) = status.expires_at {
        table.add_row(vec![
            "Expires".to_string(),
            expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ]);
    }
    if let Some(secs) = status.remaining_secs {
        table.add_row(vec!["Remaining".to_string(), format_duration(secs)]);
    }
    table.add_row(vec!["API", ctx.config.api_url.as_deref().unwrap_or("-")]);

    println!("{}", table);
    println!();

    if status.state == SessionState::Expired {
        output::warning("Run 'saldo login' to sign in again.");
    }

    Ok(())
}

fn format_duration(secs: i64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", secs)
    }
}
