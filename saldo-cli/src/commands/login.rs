//! Login command - sign in to an existing account

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;

use super::{get_context, read_password};
use crate::output;

pub async fn run(email: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = read_password("Password", false)?;

    let spinner = output::spinner("Signing in...");
    let result = ctx.auth_service.sign_in(&email, &password).await;
    spinner.finish_and_clear();

    match result {
        Ok(true) => {
            if let Some(profile) = ctx.session.profile() {
                println!("{} {} <{}>", "Signed in as".dimmed(), profile.name.bold(), profile.email);
            }
            Ok(())
        }
        Ok(false) => {
            output::error("The server did not accept these credentials");
            std::process::exit(1);
        }
        // The failure has already been reported
        Err(_) => std::process::exit(1),
    }
}
