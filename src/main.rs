//! `issueflow` (iflow) - Small team issue tracker
//!
//! All users and issues live in one JSON document under the data directory.
//! The selected user is remembered in a session file next to it.

use issueflow::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
