//! diff-names command - List paths changed between two revisions

use super::open_repository;
use crate::cli::Context;
use crate::git::DiffNameOnlyOptions;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Print the paths changed between `base` and `head`.
pub fn diff_names(
    ctx: &Context,
    base: &str,
    head: &str,
    merge_base: bool,
    path: Option<String>,
) -> Result<()> {
    let repo = open_repository(ctx)?;
    let names = repo
        .diff_name_only(
            base,
            head,
            DiffNameOnlyOptions {
                needs_merge_base: merge_base,
                path,
                ..Default::default()
            },
        )
        .with_context(|| format!("Failed to diff '{}' and '{}'", base, head))?;

    if ctx.json {
        return output::print_json(&names);
    }
    if !names.is_empty() {
        println!("{}", output::format_list(&names, ""));
    }
    Ok(())
}
