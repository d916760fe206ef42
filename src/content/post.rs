//! Post model

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::frontmatter::DateField;
use crate::helpers::parse_timestamp;

/// Status given to posts whose front-matter has none
pub const DEFAULT_STATUS: &str = "Public";

/// Type given to posts whose front-matter has none
pub const DEFAULT_TYPE: &str = "Post";

/// Status of posts whose category badge is shown but not clickable
pub const STATUS_PUBLIC_ON_DETAIL: &str = "PublicOnDetail";

/// Keys a serialized record owns; front-matter may not pass these through
pub const RECORD_FIELDS: &[&str] = &[
    "slug",
    "createdTime",
    "date",
    "status",
    "type",
    "tags",
    "category",
    "summary",
    "thumbnail",
    "author",
    "content",
];

/// A post author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,

    #[serde(
        rename = "profilePhotoUrl",
        alias = "profile_photo",
        alias = "profile_photo_url",
        default
    )]
    pub profile_photo_url: Option<String>,
}

/// One markdown file, normalized
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// URL-friendly identifier
    pub slug: String,

    /// Creation timestamp as resolved from the front-matter
    pub created_time: String,

    /// The `date` field as written, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateField>,

    /// Visibility; only the first element is meaningful
    pub status: Vec<String>,

    /// Post or page; only the first element is meaningful
    #[serde(rename = "type")]
    pub kind: Vec<String>,

    pub tags: Vec<String>,

    pub category: Vec<String>,

    pub summary: String,

    pub thumbnail: Option<String>,

    pub author: Vec<Author>,

    /// Raw markdown body
    pub content: String,

    /// Full source file path
    #[serde(skip)]
    pub source: PathBuf,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl PostRecord {
    /// Create a record with every field at its default
    pub fn new(slug: String, created_time: String, source: PathBuf) -> Self {
        Self {
            slug,
            created_time,
            date: None,
            status: vec![DEFAULT_STATUS.to_string()],
            kind: vec![DEFAULT_TYPE.to_string()],
            tags: Vec::new(),
            category: Vec::new(),
            summary: String::new(),
            thumbnail: None,
            author: Vec::new(),
            content: String::new(),
            source,
            extra: IndexMap::new(),
        }
    }

    /// The date used for ordering: structured `start_date`, else `created_time`
    pub fn effective_date(&self) -> &str {
        self.date
            .as_ref()
            .and_then(DateField::start_date)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.created_time.as_str())
    }

    /// `effective_date` parsed, `None` when it is not a recognizable timestamp
    pub fn effective_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.effective_date())
    }

    /// Title from the pass-through fields
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(|v| v.as_str())
    }

    pub fn primary_status(&self) -> Option<&str> {
        self.status.first().map(String::as_str)
    }

    pub fn primary_type(&self) -> Option<&str> {
        self.kind.first().map(String::as_str)
    }

    /// Posts get the header, footer and comments; pages do not
    pub fn is_post(&self) -> bool {
        self.primary_type() == Some(DEFAULT_TYPE)
    }

    /// Whether the category badge should render read-only
    pub fn is_read_only_category(&self) -> bool {
        self.primary_status() == Some(STATUS_PUBLIC_ON_DETAIL)
    }

    /// First category, the one shown on the detail page
    pub fn primary_category(&self) -> Option<&str> {
        self.category.first().map(String::as_str)
    }
}

/// Find a post by slug.
///
/// Slugs are not unique; on a sorted collection the newest match wins.
pub fn find_by_slug<'a>(posts: &'a [PostRecord], slug: &str) -> Option<&'a PostRecord> {
    posts.iter().find(|p| p.slug == slug)
}
