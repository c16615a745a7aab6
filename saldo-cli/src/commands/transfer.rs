//! Transfer command - move money between two accounts

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use rust_decimal::Decimal;
use saldo_core::{NewTransfer, SessionState};

use super::accounts::print_accounts;
use super::{get_context, require_session};
use crate::output;

pub async fn run(from: i64, to: i64, transfer_type: i32, amount: Decimal, yes: bool) -> Result<()> {
    let ctx = get_context()?;
    require_session(&ctx)?;

    let transfer = NewTransfer::new(from, to, transfer_type, amount);
    if let Err(reason) = transfer.validate() {
        anyhow::bail!("Invalid transfer: {}", reason);
    }

    let locale = ctx.config.locale;
    if !yes {
        println!(
            "\n{}",
            format!(
                "Transfer {} from account {} to account {}.",
                output::format_amount(amount, locale),
                from,
                to
            )
            .yellow()
        );

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let spinner = output::spinner("Submitting transfer...");
    let result = ctx.bank_service.create_transfer(&transfer).await;
    spinner.finish_and_clear();

    let receipt = match result {
        Ok(receipt) => receipt,
        Err(e) => {
            if ctx.session.state() == SessionState::Anonymous {
                // session expiry was already reported
                std::process::exit(1);
            }
            return Err(e.into());
        }
    };

    let message = if receipt.message.is_empty() {
        "Transfer completed"
    } else {
        receipt.message.as_str()
    };
    output::success(&format!("✓ {}", message));
    println!();

    print_accounts(&ctx.bank_service.accounts(), locale);
    Ok(())
}
