//! Login, logout and whoami.

use anyhow::Result;
use issueflow_lib::Session;
use serde::Serialize;

use super::CommandContext;
use crate::cli::LoginArgs;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WhoamiOutput<'a> {
    authenticated: bool,
    user: Option<&'a issueflow_lib::User>,
}

/// Select a user and remember the choice.
///
/// # Errors
///
/// Returns `UserNotFound` for an unknown id, or an error if the session
/// file cannot be written.
pub fn login(args: &LoginArgs, ctx: &CommandContext) -> Result<()> {
    let users = ctx.repo().list_users()?;
    let mut session = Session::new();
    session.select_user(&users, &args.user_id)?;
    session.persist(&ctx.config.session_path())?;

    let user = session.require_user()?;
    tracing::info!(user = %user.id, "Logged in");
    if ctx.json {
        return ctx.print_json(user);
    }
    println!("Logged in as {} ({})", user.name, user.role);
    Ok(())
}

/// Forget the selected user.
///
/// # Errors
///
/// Returns an error if the session file cannot be removed.
pub fn logout(ctx: &CommandContext) -> Result<()> {
    Session::clear(&ctx.config.session_path())?;
    tracing::info!("Logged out");
    if ctx.json {
        return ctx.print_json(&WhoamiOutput {
            authenticated: false,
            user: None,
        });
    }
    println!("Logged out.");
    Ok(())
}

/// Print the selected user, if any.
///
/// # Errors
///
/// Returns an error if the store or session file cannot be read.
pub fn whoami(ctx: &CommandContext) -> Result<()> {
    let session = ctx.session()?;
    let user = session.current_user();

    if ctx.json {
        return ctx.print_json(&WhoamiOutput {
            authenticated: user.is_some(),
            user,
        });
    }
    match user {
        Some(user) => println!("{} <{}> ({}, {})", user.name, user.email, user.id, user.role),
        None => println!("Not logged in."),
    }
    Ok(())
}
