//! Transfers command - show the transfer statement

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment};
use saldo_core::{Resource, TransferFilters};
use serde_json::json;

use super::{check_resource, get_context, require_session};
use crate::output;

pub async fn run(filters: TransferFilters, json: bool) -> Result<()> {
    let ctx = get_context()?;
    require_session(&ctx)?;

    let spinner = output::spinner("Loading transfers...");
    let transfers = ctx.bank_service.fetch_transfers(&filters).await;
    spinner.finish_and_clear();
    check_resource(&ctx, Resource::Transfers)?;

    let page = ctx.bank_service.transfer_page().unwrap_or_default();

    if json {
        let out = json!({
            "bank_account_transfers": transfers,
            "current_page": page.current_page,
            "per_page": page.per_page,
            "total_pages": page.total_pages,
            "total_records": page.total_records,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if transfers.is_empty() {
        println!("{}", "No transfers found".dimmed());
        return Ok(());
    }

    let locale = ctx.config.locale;
    let mut table = output::create_table();
    table.set_header(vec!["ID", "Date", "Type", "From", "To", "Amount", "Status"]);
    for transfer in &transfers {
        let status = if transfer.was_success {
            "ok".green()
        } else {
            "failed".red()
        };
        table.add_row(vec![
            Cell::new(transfer.id),
            Cell::new(transfer.created_at.get(..10).unwrap_or(&transfer.created_at)),
            Cell::new(&transfer.transfer_type_text),
            Cell::new(transfer.from_user_bank_account.label()),
            Cell::new(transfer.to_bank_account.label()),
            Cell::new(output::format_amount(transfer.amount_to_transfer, locale))
                .set_alignment(CellAlignment::Right),
            Cell::new(status),
        ]);
    }
    println!("{}", table);

    println!(
        "{}",
        format!(
            "Page {} of {} ({} transfers)",
            page.current_page, page.total_pages, page.total_records
        )
        .dimmed()
    );
    if page.has_next() {
        println!(
            "{}",
            format!("Next page: saldo transfers --page {}", page.current_page + 1).dimmed()
        );
    }

    Ok(())
}
