//! Logout command - forget the stored session

use anyhow::Result;
use saldo_core::SessionState;

use super::get_local_context;
use crate::output::{self, ConsoleNotifier};

pub fn run() -> Result<()> {
    let ctx = get_local_context()?;

    if ctx.session.state() == SessionState::Anonymous {
        output::info("Not signed in");
        return Ok(());
    }

    ctx.logout(&ConsoleNotifier);
    Ok(())
}
