//! Doctor command implementation.
//!
//! Reads the stored document directly so that a broken file is reported
//! instead of being silently re-seeded.

use anyhow::{Result, bail};
use issueflow_lib::validation::{Finding, audit};
use issueflow_lib::{Document, Session};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::CommandContext;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
struct DoctorReport {
    ok: bool,
    checks: Vec<CheckResult>,
}

fn push_check(
    checks: &mut Vec<CheckResult>,
    name: &str,
    status: CheckStatus,
    message: Option<String>,
    details: Option<serde_json::Value>,
) {
    checks.push(CheckResult {
        name: name.to_string(),
        status,
        message,
        details,
    });
}

fn has_error(checks: &[CheckResult]) -> bool {
    checks
        .iter()
        .any(|check| matches!(check.status, CheckStatus::Error))
}

fn print_report(report: &DoctorReport, ctx: &CommandContext) -> Result<()> {
    if ctx.json {
        return ctx.print_json(report);
    }

    println!("iflow doctor");
    for check in &report.checks {
        let label = match check.status {
            CheckStatus::Ok => "OK",
            CheckStatus::Warn => "WARN",
            CheckStatus::Error => "ERROR",
        };
        if let Some(message) = &check.message {
            println!("{label} {}: {}", check.name, message);
        } else {
            println!("{label} {}", check.name);
        }
    }
    Ok(())
}

/// Parse the data file without seeding. `None` means there is nothing to
/// audit.
fn check_document(path: &Path, checks: &mut Vec<CheckResult>) -> Option<Document> {
    let details = Some(serde_json::json!({ "path": path.display().to_string() }));
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            push_check(
                checks,
                "data.exists",
                CheckStatus::Warn,
                Some("No data file yet; the default dataset is written on first use".to_string()),
                details,
            );
            return None;
        }
        Err(e) => {
            push_check(
                checks,
                "data.read",
                CheckStatus::Error,
                Some(format!("Cannot read data file: {e}")),
                details,
            );
            return None;
        }
    };

    match serde_json::from_str::<Document>(&contents) {
        Ok(document) => {
            push_check(
                checks,
                "data.parse",
                CheckStatus::Ok,
                Some(format!(
                    "{} users, {} issues",
                    document.users.len(),
                    document.issues.len()
                )),
                None,
            );
            Some(document)
        }
        Err(e) => {
            push_check(
                checks,
                "data.parse",
                CheckStatus::Error,
                Some(format!("Unreadable ({e}); next access re-seeds defaults")),
                details,
            );
            None
        }
    }
}

/// Dangling user ids still render, so they only warn.
fn finding_status(finding: &Finding) -> CheckStatus {
    match finding.kind {
        "dangling-author" | "dangling-assignee" => CheckStatus::Warn,
        _ => CheckStatus::Error,
    }
}

fn check_integrity(document: &Document, checks: &mut Vec<CheckResult>) {
    let findings = audit(document);
    if findings.is_empty() {
        push_check(checks, "data.integrity", CheckStatus::Ok, None, None);
        return;
    }
    for finding in &findings {
        push_check(
            checks,
            &format!("data.{}", finding.kind),
            finding_status(finding),
            Some(format!("{}: {}", finding.issue_id, finding.message)),
            None,
        );
    }
}

fn check_session(path: &Path, document: &Document, checks: &mut Vec<CheckResult>) {
    if !path.exists() {
        push_check(
            checks,
            "session",
            CheckStatus::Ok,
            Some("Not logged in".to_string()),
            None,
        );
        return;
    }
    match Session::restore(path, &document.users) {
        Ok(session) => match session.current_user() {
            Some(user) => push_check(
                checks,
                "session",
                CheckStatus::Ok,
                Some(format!("Logged in as {}", user.id)),
                None,
            ),
            None => push_check(
                checks,
                "session",
                CheckStatus::Warn,
                Some("Session file names no known user".to_string()),
                None,
            ),
        },
        Err(e) => push_check(
            checks,
            "session",
            CheckStatus::Error,
            Some(format!("Cannot read session file: {e}")),
            None,
        ),
    }
}

/// Execute the doctor command.
///
/// # Errors
///
/// Returns an error when any check fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let mut checks = Vec::new();

    if ctx.config.data_dir.is_dir() {
        push_check(&mut checks, "data_dir", CheckStatus::Ok, None, None);
    } else {
        push_check(
            &mut checks,
            "data_dir",
            CheckStatus::Warn,
            Some(format!(
                "{} does not exist yet",
                ctx.config.data_dir.display()
            )),
            None,
        );
    }

    if let Some(document) = check_document(&ctx.config.data_path(), &mut checks) {
        check_integrity(&document, &mut checks);
        check_session(&ctx.config.session_path(), &document, &mut checks);
    }

    let report = DoctorReport {
        ok: !has_error(&checks),
        checks,
    };
    print_report(&report, ctx)?;

    if !report.ok {
        bail!("doctor found problems");
    }
    Ok(())
}
