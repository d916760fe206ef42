//! Reading position engine - heading outlines and scroll progress

mod nav;
mod progress;
mod toc;

pub use nav::{scroll_request, scroll_target, ScrollRequest, DEFAULT_HEADER_OFFSET};
pub use progress::{
    completion, Geometry, ProgressTracker, TargetRect, TrackerState, Viewport, ViewportEvent,
};
pub use toc::{anchor_id, build_toc, top_level, OutlineMemo, TocEntry};
