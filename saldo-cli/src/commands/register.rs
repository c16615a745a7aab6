//! Register command - create a user and sign in

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;

use super::{get_context, read_password};
use crate::output;

pub async fn run(name: Option<String>, email: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = read_password("Password", true)?;

    let spinner = output::spinner("Creating account...");
    let result = ctx.auth_service.sign_up(&name, &email, &password).await;
    spinner.finish_and_clear();

    match result {
        Ok(true) => {
            let profile = ctx.session.profile().unwrap_or_default();
            println!("{} {} <{}>", "Registered as".dimmed(), profile.name.bold(), profile.email);
            if !profile.is_confirmed() {
                output::warning("Profile details could not be loaded yet; run 'saldo whoami' later.");
            }
            Ok(())
        }
        Ok(false) => {
            output::error("The server declined the registration");
            std::process::exit(1);
        }
        // The failure has already been reported
        Err(_) => std::process::exit(1),
    }
}
