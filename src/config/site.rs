//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::LoaderOptions;
use crate::reading::DEFAULT_HEADER_OFFSET;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub profile: ProfileConfig,

    // Directory
    pub posts_dir: String,

    // Reading
    /// Fixed header height subtracted when jumping to a heading
    pub header_offset: f64,
    /// Offset subtracted from the article top for the progress bar
    pub progress_offset: f64,

    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            profile: ProfileConfig::default(),

            posts_dir: "src/posts".to_string(),

            header_offset: DEFAULT_HEADER_OFFSET,
            progress_offset: 0.0,

            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Values the post loader injects into records
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            default_profile_photo: self.profile.image.clone(),
        }
    }
}

/// Blog owner profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    /// Photo used for authors given by name only
    pub image: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            image: "/avatar.svg".to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "src/posts");
        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.progress_offset, 0.0);
        assert_eq!(config.loader_options().default_profile_photo, "/avatar.svg");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
profile:
  name: Test User
  image: /me.png
posts_dir: content/posts
header_offset: 64
highlight:
  line_number: true
language: fr
giscus:
  repo: me/blog
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.profile.name, "Test User");
        assert_eq!(config.loader_options().default_profile_photo, "/me.png");
        assert_eq!(config.posts_dir, "content/posts");
        assert_eq!(config.header_offset, 64.0);
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert!(config.extra.contains_key("giscus"));
        assert!(config.extra.contains_key("language"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: From Disk\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "From Disk");
        assert_eq!(config.profile.image, "/avatar.svg");
    }
}
