//! Command-line interface for `issueflow`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use issueflow_lib::{FilterType, SortBy, Status};
use std::path::PathBuf;

use crate::config::{CliOverrides, Config};
use crate::logging;
use commands::CommandContext;

/// `issueflow` (iflow) - Small team issue tracker.
#[derive(Parser, Debug)]
#[command(name = "iflow")]
#[command(
    author,
    version,
    about = "Small team issue tracker backed by a single JSON document",
    long_about = None,
    after_help = "Log in with `iflow login <user-id>`; `iflow users` lists the ids."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Directory holding issues.json, session.json and config.yaml
    #[arg(long, global = true, env = "ISSUEFLOW_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List selectable users
    Users,

    /// Select the current user
    Login(LoginArgs),

    /// Forget the current user
    Logout,

    /// Show the current user
    Whoami,

    /// List issues
    List(ListArgs),

    /// Show issue details
    Show(IdArg),

    /// Create a new issue
    Create(CreateArgs),

    /// Update an existing issue
    Update(UpdateArgs),

    /// Close an issue (admins only)
    Close(IdArg),

    /// Reopen a closed issue (admins only)
    Reopen(IdArg),

    /// Delete an issue
    Delete(IdArg),

    /// List every tag in use
    Tags(TagsArgs),

    /// Replace all data with the default dataset
    Reset(ResetArgs),

    /// Check stored data for integrity problems
    Doctor,

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// User id, e.g. u1
    pub user_id: String,
}

#[derive(Args, Debug)]
pub struct IdArg {
    /// Issue id
    pub id: String,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only issues assigned to or created by you
    #[arg(long, value_parser = parse_filter)]
    pub filter: Option<FilterType>,

    /// Keep issues with any of these tags (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// created-desc, created-asc, title-asc, title-desc, status, effort-desc, effort-asc
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortBy>,
}

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    /// Assignee user id (repeatable)
    #[arg(long = "assignee", value_name = "USER_ID")]
    pub assignees: Vec<String>,

    /// Tag (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// YYYY-MM-DD or RFC 3339
    #[arg(long)]
    pub deadline: Option<String>,

    /// Estimated effort in days
    #[arg(long)]
    pub effort: Option<u32>,
}

#[derive(Args, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct UpdateArgs {
    /// Issue id
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// open, in-progress or closed
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,

    /// Replace assignees (repeatable)
    #[arg(long = "assignee", value_name = "USER_ID", conflicts_with = "clear_assignees")]
    pub assignees: Vec<String>,

    /// Remove all assignees
    #[arg(long)]
    pub clear_assignees: bool,

    /// Replace tags (repeatable)
    #[arg(long = "tag", value_name = "TAG", conflicts_with = "clear_tags")]
    pub tags: Vec<String>,

    /// Remove all tags
    #[arg(long)]
    pub clear_tags: bool,

    /// YYYY-MM-DD or RFC 3339
    #[arg(long, conflicts_with = "clear_deadline")]
    pub deadline: Option<String>,

    #[arg(long)]
    pub clear_deadline: bool,

    /// Estimated effort in days
    #[arg(long, conflicts_with = "clear_effort")]
    pub effort: Option<u32>,

    #[arg(long)]
    pub clear_effort: bool,
}

#[derive(Args, Debug, Default)]
pub struct TagsArgs {
    /// Show the suggested tags offered when composing an issue instead
    #[arg(long)]
    pub predefined: bool,
}

#[derive(Args, Debug, Default)]
pub struct ResetArgs {
    /// Confirm discarding all changes
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

fn parse_filter(s: &str) -> Result<FilterType, String> {
    s.parse().map_err(|e: issueflow_lib::IssueFlowError| e.to_string())
}

fn parse_sort(s: &str) -> Result<SortBy, String> {
    s.parse().map_err(|e: issueflow_lib::IssueFlowError| e.to_string())
}

fn parse_status(s: &str) -> Result<Status, String> {
    s.parse().map_err(|e: issueflow_lib::IssueFlowError| e.to_string())
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_json)?;

    let Some(command) = cli.command else {
        println!("iflow - Small team issue tracker. Use --help for usage.");
        return Ok(());
    };

    // Commands that never touch the data directory.
    match &command {
        Commands::Completions(args) => {
            commands::completions::execute(args.shell, &mut Cli::command());
            return Ok(());
        }
        Commands::Version => return commands::version::execute(cli.json),
        _ => {}
    }

    let config = Config::load(&CliOverrides {
        data_dir: cli.data_dir,
    })?;
    let ctx = CommandContext::new(config, cli.json);
    tracing::debug!(command = command.name(), "Dispatching command");

    match command {
        Commands::Users => commands::users::execute(&ctx),
        Commands::Login(args) => commands::session::login(&args, &ctx),
        Commands::Logout => commands::session::logout(&ctx),
        Commands::Whoami => commands::session::whoami(&ctx),
        Commands::List(args) => commands::list::execute(&args, &ctx),
        Commands::Show(args) => commands::show::execute(&args.id, &ctx),
        Commands::Create(args) => commands::create::execute(args, &ctx),
        Commands::Update(args) => commands::update::execute(args, &ctx),
        Commands::Close(args) => commands::status::close(&args.id, &ctx),
        Commands::Reopen(args) => commands::status::reopen(&args.id, &ctx),
        Commands::Delete(args) => commands::delete::execute(&args.id, &ctx),
        Commands::Tags(args) => commands::tags::execute(&args, &ctx),
        Commands::Reset(args) => commands::reset::execute(&args, &ctx),
        Commands::Doctor => commands::doctor::execute(&ctx),
        Commands::Completions(_) | Commands::Version => Ok(()),
    }
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Login(_) => "login",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Close(_) => "close",
            Self::Reopen(_) => "reopen",
            Self::Delete(_) => "delete",
            Self::Tags(_) => "tags",
            Self::Reset(_) => "reset",
            Self::Doctor => "doctor",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}
