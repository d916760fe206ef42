//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::error::FrontMatterError;
use super::post::Author;

/// Render a YAML scalar as a string; collections have no string form
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Known keys as written, before coercion
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrontMatter {
    slug: Option<Value>,
    #[serde(rename = "createdTime")]
    created_time: Option<Value>,
    date: Option<Value>,
    status: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    tags: Option<Value>,
    category: Option<Value>,
    summary: Option<Value>,
    thumbnail: Option<Value>,
    author: Option<Value>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

/// Coerces known keys, noting every one whose shape had to be dropped
struct Coercer {
    dropped: Vec<&'static str>,
}

impl Coercer {
    /// A string field; other scalars are stringified
    fn string(&mut self, field: &'static str, value: Option<Value>) -> Option<String> {
        match value {
            None | Some(Value::Null) => None,
            Some(value) => {
                let s = scalar_to_string(&value);
                if s.is_none() {
                    self.dropped.push(field);
                }
                s
            }
        }
    }

    /// Handles both a single string and a list of strings
    fn string_or_vec(&mut self, field: &'static str, value: Option<Value>) -> Option<Vec<String>> {
        match value {
            None | Some(Value::Null) => None,
            Some(Value::Sequence(items)) => {
                let strings: Vec<String> = items.iter().filter_map(scalar_to_string).collect();
                if strings.len() != items.len() {
                    self.dropped.push(field);
                }
                Some(strings)
            }
            Some(value) => self.string(field, Some(value)).map(|s| vec![s]),
        }
    }

    fn date(&mut self, value: Option<Value>) -> Option<DateField> {
        match value {
            Some(Value::Mapping(map)) => Some(DateField::Structured {
                start_date: map.get("start_date").and_then(scalar_to_string),
                end_date: map.get("end_date").and_then(scalar_to_string),
            }),
            value => self.string("date", value).map(DateField::Raw),
        }
    }

    fn author(&mut self, value: Option<Value>) -> Option<AuthorField> {
        match value {
            None | Some(Value::Null) => None,
            Some(value) => match serde_yaml::from_value::<AuthorField>(value) {
                Ok(field) => Some(field),
                Err(_) => {
                    self.dropped.push("author");
                    None
                }
            },
        }
    }
}

impl From<RawFrontMatter> for FrontMatter {
    fn from(raw: RawFrontMatter) -> Self {
        let mut c = Coercer { dropped: Vec::new() };
        FrontMatter {
            slug: c.string("slug", raw.slug),
            created_time: c.string("createdTime", raw.created_time),
            date: c.date(raw.date),
            status: c.string_or_vec("status", raw.status),
            kind: c.string_or_vec("type", raw.kind),
            tags: c.string_or_vec("tags", raw.tags),
            category: c.string_or_vec("category", raw.category),
            summary: c.string("summary", raw.summary),
            thumbnail: c.string("thumbnail", raw.thumbnail),
            author: c.author(raw.author),
            extra: raw.extra,
            dropped: c.dropped,
        }
    }
}

/// The `date` key: either a structured range or a plain timestamp string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateField {
    Structured {
        start_date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<String>,
    },
    Raw(String),
}

impl DateField {
    /// `start_date` of a structured date
    pub fn start_date(&self) -> Option<&str> {
        match self {
            DateField::Structured { start_date, .. } => start_date.as_deref(),
            DateField::Raw(_) => None,
        }
    }

    /// The plain string form, if the date was given as one
    pub fn raw(&self) -> Option<&str> {
        match self {
            DateField::Raw(s) => Some(s),
            DateField::Structured { .. } => None,
        }
    }
}

/// The accepted shapes of the `author` key
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    Many(Vec<AuthorEntry>),
    One(AuthorEntry),
}

/// One author given either by name or as a full profile
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AuthorEntry {
    Name(String),
    Profile(Author),
}

impl AuthorField {
    /// Resolve into the canonical list, giving bare names the default photo
    pub fn into_authors(self, default_photo: &str) -> Vec<Author> {
        let entries = match self {
            AuthorField::Many(entries) => entries,
            AuthorField::One(entry) => vec![entry],
        };

        entries
            .into_iter()
            .map(|entry| match entry {
                AuthorEntry::Name(name) => Author {
                    name,
                    profile_photo_url: Some(default_photo.to_string()),
                },
                AuthorEntry::Profile(author) => author,
            })
            .collect()
    }
}

/// Front-matter data from a post.
///
/// Known keys with an unusable shape fall back to `None` instead of failing
/// the parse; their names are kept in `dropped`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawFrontMatter")]
pub struct FrontMatter {
    pub slug: Option<String>,
    pub created_time: Option<String>,
    pub date: Option<DateField>,
    pub status: Option<Vec<String>>,
    pub kind: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub summary: Option<String>,
    pub thumbnail: Option<String>,
    pub author: Option<AuthorField>,

    /// Every other key, in document order
    pub extra: IndexMap<String, Value>,

    /// Known keys whose values were malformed, or had malformed list items
    pub dropped: Vec<&'static str>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let Some((block, body)) = split(content) else {
            return Ok((FrontMatter::default(), content));
        };

        if block.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        match serde_yaml::from_str::<Value>(block)? {
            Value::Null => Ok((FrontMatter::default(), body)),
            value @ Value::Mapping(_) => Ok((serde_yaml::from_value(value)?, body)),
            _ => Err(FrontMatterError::NotAMapping),
        }
    }
}

/// Split a `---` delimited block off the top of `content`.
///
/// The opening delimiter must be the first line. The body starts after the
/// line break that ends the closing delimiter. Without a closing delimiter
/// there is no front-matter.
fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
slug: hello
date: 2024-01-15 10:30:00
tags:
  - rust
  - blog
category:
  - programming
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.slug, Some("hello".to_string()));
        assert_eq!(fm.date, Some(DateField::Raw("2024-01-15 10:30:00".into())));
        assert_eq!(fm.tags, Some(vec!["rust".to_string(), "blog".to_string()]));
        assert_eq!(fm.category, Some(vec!["programming".to_string()]));
        assert_eq!(
            fm.extra.get("title"),
            Some(&Value::String("Hello World".into()))
        );
        assert_eq!(remaining, "\nThis is the content.\n");
    }

    #[test]
    fn test_no_frontmatter_keeps_whole_body() {
        let content = "# Just a title\n\nSome text.\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.slug.is_none());
        assert!(fm.extra.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unclosed_block_is_not_frontmatter() {
        let content = "---\ntitle: never closed\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.extra.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nbody").unwrap();
        assert!(fm.status.is_none());
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\nslug: crlf\r\n---\r\nBody line\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.slug, Some("crlf".to_string()));
        assert_eq!(remaining, "Body line\r\n");
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_non_mapping_is_an_error() {
        let content = "---\n- a\n- b\n---\nbody";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::NotAMapping)
        ));
    }

    #[test]
    fn test_parse_single_string_fields() {
        let content = r#"---
status: Private
type: Page
tags: Notes
category: Blog
---
"#;

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.status, Some(vec!["Private".to_string()]));
        assert_eq!(fm.kind, Some(vec!["Page".to_string()]));
        assert_eq!(fm.tags, Some(vec!["Notes".to_string()]));
        assert_eq!(fm.category, Some(vec!["Blog".to_string()]));
        assert!(fm.dropped.is_empty());
    }

    #[test]
    fn test_scalars_are_stringified() {
        let content = "---\nslug: 2024\ntags: [1, true, x]\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.slug, Some("2024".to_string()));
        assert_eq!(
            fm.tags,
            Some(vec!["1".to_string(), "true".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn test_odd_shapes_fall_back() {
        let content = r#"---
slug:
  nested: value
tags:
  a: 1
author: 42
summary: [not, a, string]
---
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.slug.is_none());
        assert!(fm.tags.is_none());
        assert!(fm.author.is_none());
        assert!(fm.summary.is_none());
        assert_eq!(fm.dropped, vec!["slug", "tags", "summary", "author"]);
    }

    #[test]
    fn test_malformed_list_items_are_dropped() {
        let content = "---\ntags: [rust, {a: 1}, web]\ncategory: [Blog]\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, Some(vec!["rust".to_string(), "web".to_string()]));
        assert_eq!(fm.dropped, vec!["tags"]);
    }

    #[test]
    fn test_structured_date() {
        let content = "---\ndate:\n  start_date: 2024-06-01\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let date = fm.date.unwrap();
        assert_eq!(date.start_date(), Some("2024-06-01"));
        assert_eq!(date.raw(), None);
    }

    #[test]
    fn test_author_shapes() {
        let content = "---\nauthor: Alice\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.author,
            Some(AuthorField::One(AuthorEntry::Name("Alice".into())))
        );

        let content = "---\nauthor:\n  name: Bob\n  profilePhotoUrl: x\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let authors = fm.author.unwrap().into_authors("/default.png");
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].name, "Bob");
        assert_eq!(authors[0].profile_photo_url.as_deref(), Some("x"));
    }

    #[test]
    fn test_mixed_author_list() {
        let content = r#"---
author:
  - Alice
  - name: Bob
    profile_photo: x
---
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let authors = fm.author.unwrap().into_authors("/default.png");
        assert_eq!(
            authors,
            vec![
                Author {
                    name: "Alice".into(),
                    profile_photo_url: Some("/default.png".into()),
                },
                Author {
                    name: "Bob".into(),
                    profile_photo_url: Some("x".into()),
                },
            ]
        );
    }

    #[test]
    fn test_extra_keeps_document_order() {
        let content = "---\nzeta: 1\nslug: s\nalpha: 2\nmiddle: three\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<&str> = fm.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "middle"]);
    }

    #[test]
    fn test_markdown_rule_at_top_is_not_frontmatter() {
        let content = "----\n\nText after a rule.\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.extra.is_empty());
        assert_eq!(remaining, content);
    }
}
