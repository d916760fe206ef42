//! Evaluate reading progress for given geometry

use anyhow::Result;

use crate::reading::{completion, Geometry};
use crate::Blog;

/// Document position and size of the content region, and the window state
#[derive(Debug, Clone, Copy)]
pub struct ProgressArgs {
    pub top: f64,
    pub height: f64,
    pub viewport: f64,
    pub scroll: f64,
    /// Overrides the configured progress offset
    pub offset: Option<f64>,
}

/// Completion percentage for one scroll position
pub fn evaluate(blog: &Blog, args: ProgressArgs) -> Result<f64> {
    if args.height < 0.0 || args.viewport < 0.0 {
        anyhow::bail!("Heights must not be negative");
    }

    let offset = args.offset.unwrap_or(blog.config.progress_offset);
    let geometry = Geometry {
        element_top: args.top - offset,
        element_height: args.height,
        viewport_height: args.viewport,
        scroll_y: args.scroll,
    };
    Ok(completion(&geometry))
}

/// Print the completion percentage for one scroll position
pub fn run(blog: &Blog, args: ProgressArgs) -> Result<()> {
    println!("{:.1}", evaluate(blog, args)?);
    Ok(())
}
