//! Command implementations.
//!
//! Each command loads what it needs through a [`CommandContext`], prints
//! text or JSON, and returns an `anyhow` error on failure.

pub mod completions;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod list;
pub mod reset;
pub mod session;
pub mod show;
pub mod status;
pub mod tags;
pub mod update;
pub mod users;
pub mod version;

use anyhow::Result;
use issueflow_lib::{IssueRepository, JsonFileStore, Session, User};
use serde::Serialize;

use crate::config::Config;

/// Shared state for one CLI invocation.
pub struct CommandContext {
    pub config: Config,
    pub json: bool,
    repo: IssueRepository<JsonFileStore>,
}

impl CommandContext {
    #[must_use]
    pub fn new(config: Config, json: bool) -> Self {
        let repo = config.open_repository();
        Self { config, json, repo }
    }

    #[must_use]
    pub const fn repo(&self) -> &IssueRepository<JsonFileStore> {
        &self.repo
    }

    /// Restore the saved session against the current user list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or session file cannot be read.
    pub fn session(&self) -> Result<Session> {
        let users = self.repo.list_users()?;
        Ok(Session::restore(&self.config.session_path(), &users)?)
    }

    /// The logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when nobody is logged in.
    pub fn current_user(&self) -> Result<User> {
        Ok(self.session()?.require_user()?.clone())
    }

    /// Print `value` as pretty JSON on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
