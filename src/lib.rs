//! md-blog: the core of a statically exported markdown blog
//!
//! This crate loads markdown posts with front-matter into normalized
//! records, derives a heading outline from each body, renders bodies with
//! matching anchor ids, and computes reading progress from scroll geometry.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod reading;

use anyhow::Result;
use std::path::Path;

use content::{find_by_slug, MarkdownRenderer, PostLoader, PostRecord};
use reading::{scroll_request, ProgressTracker, ScrollRequest};

/// A blog rooted at a directory
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the markdown posts
    pub posts_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Post loader configured from the site config
    pub fn loader(&self) -> PostLoader {
        PostLoader::new(self.config.loader_options())
    }

    /// Load every post, newest first
    pub fn load_posts(&self) -> Result<Vec<PostRecord>> {
        Ok(self.loader().load_posts(&self.posts_dir)?)
    }

    /// Load the posts and pick the one with `slug`
    pub fn find_post(&self, slug: &str) -> Result<PostRecord> {
        let posts = self.load_posts()?;
        find_by_slug(&posts, slug)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No post with slug {:?}", slug))
    }

    /// Markdown renderer configured from the site config
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        )
    }

    /// Progress tracker measuring from below the configured offset
    pub fn progress_tracker(&self) -> ProgressTracker {
        ProgressTracker::new(self.config.progress_offset)
    }

    /// Resolve an outline click, clearing the configured header height
    pub fn scroll_request(
        &self,
        id: &str,
        heading_top: Option<f64>,
        scroll_y: f64,
    ) -> Option<ScrollRequest> {
        scroll_request(id, heading_top, scroll_y, self.config.header_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_blog_with_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "posts_dir: posts\nprofile:\n  image: /me.png\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("posts")).unwrap();
        fs::write(
            dir.path().join("posts").join("hello.md"),
            "---\nauthor: Alice\ndate: 2024-01-01\n---\n## Intro\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let post = blog.find_post("hello").unwrap();
        assert_eq!(post.author[0].profile_photo_url.as_deref(), Some("/me.png"));
        assert!(blog.find_post("other").is_err());
    }

    #[test]
    fn test_blog_without_config_or_posts() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.posts_dir, dir.path().join("src/posts"));
        assert!(blog.load_posts().unwrap().is_empty());
    }

    #[test]
    fn test_reading_offsets_come_from_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "header_offset: 64\nprogress_offset: 20\n",
        )
        .unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let request = blog.scroll_request("intro", Some(300.0), 1000.0).unwrap();
        assert_eq!(request.top, 1236.0);
        assert_eq!(request.fragment, "#intro");
        assert_eq!(blog.progress_tracker().offset_top(), 20.0);

        let defaults = Blog::new(TempDir::new().unwrap().path()).unwrap();
        let request = defaults.scroll_request("intro", Some(300.0), 1000.0).unwrap();
        assert_eq!(request.top, 1220.0);
        assert_eq!(defaults.progress_tracker().offset_top(), 0.0);
    }
}
