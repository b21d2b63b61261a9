use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tempfile::TempDir;

/// A throwaway data directory for one test.
pub struct IflowWorkspace {
    _temp: TempDir,
    data_dir: PathBuf,
}

impl IflowWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let data_dir = temp.path().join(".issueflow");
        Self {
            _temp: temp,
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join("issues.json")
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("iflow").expect("iflow binary");
        cmd.env("ISSUEFLOW_DIR", &self.data_dir)
            .env_remove("ISSUEFLOW_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CmdOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }
}

/// Run `iflow` with `args` in `workspace`; `label` names the step in
/// failure messages.
pub fn run_iflow<I, S>(workspace: &IflowWorkspace, args: I, label: &str) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = workspace
        .command()
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to run iflow: {e}"));
    CmdOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Like [`run_iflow`], but panics unless the command succeeds.
pub fn run_ok<I, S>(workspace: &IflowWorkspace, args: I, label: &str) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let out = run_iflow(workspace, args, label);
    assert!(
        out.status.success(),
        "{label} failed\nstdout: {}\nstderr: {}",
        out.stdout,
        out.stderr
    );
    out
}
