//! Tags command: the vocabulary of tags in use, ascending, or the
//! predefined suggestions.

use anyhow::Result;
use issueflow_lib::seed::PREDEFINED_TAGS;
use issueflow_lib::tag_vocabulary;

use super::CommandContext;
use crate::cli::TagsArgs;

/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn execute(args: &TagsArgs, ctx: &CommandContext) -> Result<()> {
    let tags: Vec<String> = if args.predefined {
        PREDEFINED_TAGS.iter().map(ToString::to_string).collect()
    } else {
        tag_vocabulary(&ctx.repo().list_issues()?)
    };

    if ctx.json {
        return ctx.print_json(&tags);
    }
    for tag in &tags {
        println!("{tag}");
    }
    Ok(())
}
