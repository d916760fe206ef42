//! CLI commands

pub mod list;
pub mod progress;
pub mod render;
pub mod toc;
