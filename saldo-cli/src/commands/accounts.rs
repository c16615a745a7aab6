//! Accounts command - list bank accounts and balances

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment};
use rust_decimal::Decimal;
use saldo_core::{BankAccount, Locale, Resource};

use super::{check_resource, get_context, require_session};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    require_session(&ctx)?;

    let spinner = output::spinner("Loading accounts...");
    let accounts = ctx.bank_service.fetch_accounts().await;
    spinner.finish_and_clear();
    check_resource(&ctx, Resource::Accounts)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    print_accounts(&accounts, ctx.config.locale);
    Ok(())
}

/// Print accounts as a table followed by the total balance
pub fn print_accounts(accounts: &[BankAccount], locale: Locale) {
    if accounts.is_empty() {
        println!("{}", "No bank accounts".dimmed());
        return;
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Bank", "Agency", "Account", "Type", "Holder", "Balance"]);
    for account in accounts {
        table.add_row(vec![
            Cell::new(account.id),
            Cell::new(format!("{} ({})", account.bank_name, account.bank_code)),
            Cell::new(account.agency()),
            Cell::new(account.number()),
            Cell::new(&account.account_type),
            Cell::new(&account.holder_name),
            Cell::new(output::format_amount(account.amount, locale))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);

    let total: Decimal = accounts.iter().map(|a| a.amount).sum();
    println!(
        "{} {}",
        "Total balance:".bold(),
        output::format_amount(total, locale)
    );
}
