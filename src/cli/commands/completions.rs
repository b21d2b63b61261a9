//! Shell completions command.

use clap::Command;
use clap_complete::{Shell, generate};
use std::io;

/// Write completions for `shell` to stdout.
pub fn execute(shell: Shell, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, &mut io::stdout());
}
