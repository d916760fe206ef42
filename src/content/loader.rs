//! Post loader - reads every markdown post in one directory

use std::cmp::Reverse;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use super::error::LoadError;
use super::post::{PostRecord, DEFAULT_STATUS, DEFAULT_TYPE, RECORD_FIELDS};
use super::FrontMatter;
use crate::helpers::{iso_timestamp, Clock, SystemClock};

/// Extension a file needs to be picked up as a post
const MARKDOWN_EXTENSION: &str = ".md";

/// Values the loader injects into records but does not own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Photo given to authors listed by name only
    pub default_profile_photo: String,
}

/// Loads posts from a directory
pub struct PostLoader<C = SystemClock> {
    options: LoaderOptions,
    clock: C,
}

impl PostLoader<SystemClock> {
    /// Create a loader that stamps undated posts with the current time
    pub fn new(options: LoaderOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl<C: Clock> PostLoader<C> {
    /// Create a loader with an explicit clock
    pub fn with_clock(options: LoaderOptions, clock: C) -> Self {
        Self { options, clock }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load all posts directly inside `dir`, newest first.
    ///
    /// Any unreadable file or malformed front-matter fails the whole load.
    /// A missing directory holds no posts.
    pub fn load_posts(&self, dir: &Path) -> Result<Vec<PostRecord>, LoadError> {
        if !dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| LoadError::Io {
                path: e.path().unwrap_or(dir).to_path_buf(),
                source: io::Error::from(e),
            })?;

            if !entry.file_type().is_file() || !is_markdown_file(entry.path()) {
                continue;
            }

            posts.push(self.load_post(entry.path())?);
        }

        // Sort by date descending (newest first); unparseable dates go last
        posts.sort_by_cached_key(|p| Reverse(p.effective_timestamp()));

        tracing::info!("Loaded {} posts from {:?}", posts.len(), dir);
        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<PostRecord, LoadError> {
        let _span = tracing::debug_span!("post", file = ?path).entered();

        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&raw).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        for field in &fm.dropped {
            tracing::warn!(
                "{}: ignoring malformed front-matter field `{}`",
                path.display(),
                field
            );
        }

        let slug = fm.slug.unwrap_or_else(|| slug_from_file_name(path));

        let created_time = fm
            .created_time
            .or_else(|| {
                fm.date
                    .as_ref()
                    .and_then(|d| d.start_date().or(d.raw()))
                    .map(str::to_string)
            })
            .unwrap_or_else(|| iso_timestamp(&self.clock.now()));

        let mut post = PostRecord::new(slug, created_time, path.to_path_buf());
        post.date = fm.date;
        post.status = fm
            .status
            .unwrap_or_else(|| vec![DEFAULT_STATUS.to_string()]);
        post.kind = fm.kind.unwrap_or_else(|| vec![DEFAULT_TYPE.to_string()]);
        post.tags = fm.tags.unwrap_or_default();
        post.category = fm.category.unwrap_or_default();
        post.summary = fm.summary.unwrap_or_default();
        post.thumbnail = fm.thumbnail;
        post.author = fm
            .author
            .map(|a| a.into_authors(&self.options.default_profile_photo))
            .unwrap_or_default();
        post.content = body.to_string();
        post.extra = fm
            .extra
            .into_iter()
            .filter(|(key, _)| {
                let shadowed = RECORD_FIELDS.contains(&key.as_str());
                if shadowed {
                    tracing::warn!(
                        "{}: front-matter key `{}` is a record field, ignoring it",
                        path.display(),
                        key
                    );
                }
                !shadowed
            })
            .collect();

        tracing::debug!("Loaded post {}", post.slug);
        Ok(post)
    }
}

/// Check if a file is a markdown post
fn is_markdown_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(MARKDOWN_EXTENSION))
        .unwrap_or(false)
}

/// File name without the markdown extension
fn slug_from_file_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.strip_suffix(MARKDOWN_EXTENSION)
        .unwrap_or(&*name)
        .to_string()
}
