//! Users command implementation.

use anyhow::Result;

use super::CommandContext;
use crate::format::UserEntry;

/// Execute the users command.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let users = ctx.repo().list_users()?;
    let session = ctx.session()?;
    let current_id = session.current_user().map(|u| u.id.as_str());

    if ctx.json {
        let entries: Vec<UserEntry<'_>> = users
            .iter()
            .map(|user| UserEntry {
                user,
                current: Some(user.id.as_str()) == current_id,
            })
            .collect();
        return ctx.print_json(&entries);
    }

    for user in &users {
        let marker = if Some(user.id.as_str()) == current_id {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {:<4} {:<3} {:<16} {:<24} {}",
            user.id, user.avatar, user.name, user.email, user.role
        );
    }
    Ok(())
}
