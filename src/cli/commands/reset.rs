//! Reset command implementation.

use anyhow::{Result, bail};
use serde::Serialize;

use super::CommandContext;
use crate::cli::ResetArgs;

#[derive(Serialize)]
struct ResetOutput {
    users: usize,
    issues: usize,
}

/// Replace all data with the default dataset.
///
/// # Errors
///
/// Returns an error without `--yes`, or if storage cannot be written.
pub fn execute(args: &ResetArgs, ctx: &CommandContext) -> Result<()> {
    if !args.yes {
        bail!("reset discards all changes; rerun with --yes to confirm");
    }

    let document = ctx.repo().reset()?;

    if ctx.json {
        return ctx.print_json(&ResetOutput {
            users: document.users.len(),
            issues: document.issues.len(),
        });
    }
    println!(
        "Reset to default data: {} users, {} issues.",
        document.users.len(),
        document.issues.len()
    );
    Ok(())
}
