//! Print the outline of a post

use anyhow::Result;

use crate::reading::{build_toc, top_level, TocEntry};
use crate::Blog;

/// Print the outline of the post with `slug`.
///
/// `top_only` limits it to the level-0 entries of the inline quick-nav.
pub fn run(blog: &Blog, slug: &str, top_only: bool, json: bool) -> Result<()> {
    let post = blog.find_post(slug)?;
    let toc = build_toc(&post.content);
    let entries: Vec<&TocEntry> = if top_only {
        top_level(&toc)
    } else {
        toc.iter().collect()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{} has no headings", post.slug);
        return Ok(());
    }

    for line in format_outline(&entries) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per entry, indented by level, with its anchor
fn format_outline(entries: &[&TocEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| {
            format!(
                "{}{} (#{})",
                "  ".repeat(usize::from(e.indent_level)),
                e.text,
                e.id
            )
        })
        .collect()
}
