//! CLI command implementations

pub mod accounts;
pub mod config;
pub mod login;
pub mod logout;
pub mod register;
pub mod status;
pub mod transfer;
pub mod transfers;
pub mod whoami;

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::Password;
use saldo_core::{LocalContext, Resource, SaldoContext, SessionState};

use crate::output::ConsoleNotifier;

/// Environment variable read instead of prompting for a password
const PASSWORD_ENV: &str = "SALDO_PASSWORD";

/// Get the saldo directory from environment or default
pub fn get_saldo_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SALDO_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".saldo"))
}

fn ensure_saldo_dir() -> Result<PathBuf> {
    let saldo_dir = get_saldo_dir()?;
    std::fs::create_dir_all(&saldo_dir)
        .with_context(|| format!("Failed to create saldo directory: {:?}", saldo_dir))?;
    Ok(saldo_dir)
}

/// Get or create saldo context
pub fn get_context() -> Result<SaldoContext> {
    let saldo_dir = ensure_saldo_dir()?;
    SaldoContext::new(&saldo_dir, Arc::new(ConsoleNotifier))
        .context("Failed to initialize saldo context")
}

/// Session-only context for commands that never reach the API
pub fn get_local_context() -> Result<LocalContext> {
    let saldo_dir = ensure_saldo_dir()?;
    LocalContext::open(&saldo_dir).context("Failed to load saldo settings")
}

/// Refuse to continue without a live session
pub fn require_session(ctx: &SaldoContext) -> Result<()> {
    match ctx.session.state() {
        SessionState::Authenticated => Ok(()),
        SessionState::Expired => {
            anyhow::bail!("Your session has expired. Run 'saldo login' to sign in again.")
        }
        SessionState::Anonymous => anyhow::bail!("Not signed in. Run 'saldo login' first."),
    }
}

/// Turn the recorded failure of a resource into a command error
///
/// When the failure ended the session, the expiry notice has already been
/// shown and the process just exits.
pub fn check_resource(ctx: &SaldoContext, resource: Resource) -> Result<()> {
    let Some(message) = ctx.bank_service.error(resource) else {
        return Ok(());
    };
    if ctx.session.state() == SessionState::Anonymous {
        std::process::exit(1);
    }
    anyhow::bail!(message)
}

/// Get password from SALDO_PASSWORD, piped stdin, or an interactive prompt
pub fn read_password(prompt: &str, confirm: bool) -> Result<String> {
    if let Ok(p) = std::env::var(PASSWORD_ENV) {
        return Ok(p);
    }

    if atty::isnt(atty::Stream::Stdin) {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        let password = line.trim_end_matches(&['\r', '\n'][..]).to_string();
        if password.is_empty() {
            anyhow::bail!("No password provided on stdin");
        }
        return Ok(password);
    }

    let mut prompt_builder = Password::new().with_prompt(prompt);
    if confirm {
        prompt_builder = prompt_builder.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt_builder.interact()?)
}
