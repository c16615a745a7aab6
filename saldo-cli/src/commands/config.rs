//! Config command - show or change settings.json

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use saldo_core::config::Config;
use saldo_core::Locale;

use super::get_saldo_dir;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the settings stored in the data directory
    Show,
    /// Change one or more settings
    Set {
        /// Base URL of the banking API
        #[arg(long)]
        api_url: Option<String>,
        /// Message language (en, pt-BR)
        #[arg(long)]
        locale: Option<Locale>,
        /// Prefix for the Authorization header, e.g. Bearer
        #[arg(long)]
        auth_scheme: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

pub fn run(command: Option<ConfigCommands>) -> Result<()> {
    let saldo_dir = get_saldo_dir()?;
    std::fs::create_dir_all(&saldo_dir)?;
    let mut config = Config::from_file(&saldo_dir)?;

    match command {
        Some(ConfigCommands::Set {
            api_url,
            locale,
            auth_scheme,
            timeout,
        }) => {
            if let Some(url) = api_url {
                config.set_api_url(&url)?;
            }
            if let Some(locale) = locale {
                config.locale = locale;
            }
            if let Some(scheme) = auth_scheme {
                let scheme = scheme.trim();
                config.auth_scheme = (!scheme.is_empty()).then(|| scheme.to_string());
            }
            if let Some(secs) = timeout {
                if secs == 0 {
                    anyhow::bail!("Timeout must be at least one second");
                }
                config.timeout_secs = secs;
            }

            config.save(&saldo_dir)?;
            println!("{}", "Settings saved".green());
            print_config(&config);
            Ok(())
        }
        Some(ConfigCommands::Show) | None => {
            print_config(&config);
            Ok(())
        }
    }
}

fn print_config(config: &Config) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["API", config.api_url.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Locale", config.locale.code()]);
    table.add_row(vec!["Auth scheme", config.auth_scheme.as_deref().unwrap_or("(raw token)")]);
    table.add_row(vec!["Timeout".to_string(), format!("{}s", config.timeout_secs)]);
    println!("{}", table);
}
