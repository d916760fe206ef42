//! Heading outline (table of contents) of a markdown body

use lazy_static::lazy_static;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use crate::content::parser_options;

lazy_static! {
    static ref SECTION_HEADING: Regex = Regex::new(r"^##\s+(.+)$").unwrap();
    static ref SUBSECTION_HEADING: Regex = Regex::new(r"^###\s+(.+)$").unwrap();
    static ref NON_ANCHOR_CHARS: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// One heading in the outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    /// Anchor id of the rendered heading
    pub id: String,
    /// Heading text as written, without a closing `#` sequence
    pub text: String,
    /// 0 for `##`, 1 for `###`
    pub indent_level: u8,
}

/// Derive the anchor id for a heading.
///
/// Lowercases, trims, drops everything but word characters, whitespace and
/// hyphens, then joins whitespace runs with a single hyphen.
pub fn anchor_id(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_ANCHOR_CHARS.replace_all(lowered.trim(), "");
    WHITESPACE_RUN.replace_all(&stripped, "-").into_owned()
}

/// Build the outline from `##` and `###` lines, in document order.
///
/// `#` titles and headings deeper than `###` are left out. The id comes from
/// the heading as markdown reads it (closing `#`s, link targets and entities
/// resolved), so it matches the id the renderer gives the same heading.
pub fn build_toc(content: &str) -> Vec<TocEntry> {
    let parsed = heading_texts(content);
    let mut entries = Vec::new();
    let mut offset = 0;

    for raw in content.split_inclusive('\n') {
        let start = offset;
        offset += raw.len();

        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let (caps, indent_level) = match SECTION_HEADING.captures(line) {
            Some(caps) => (caps, 0),
            None => match SUBSECTION_HEADING.captures(line) {
                Some(caps) => (caps, 1),
                None => continue,
            },
        };

        let text = strip_closing_sequence(caps[1].trim());
        if text.is_empty() {
            continue;
        }

        // Lines the document parse does not see as headings (e.g. inside a
        // fence) are read on their own
        let plain = parsed
            .get(&start)
            .cloned()
            .or_else(|| heading_texts(line).remove(&0))
            .unwrap_or_else(|| text.to_string());

        entries.push(TocEntry {
            id: anchor_id(&plain),
            text: text.to_string(),
            indent_level,
        });
    }

    entries
}

/// Plain text of every heading, keyed by the byte offset it starts at
fn heading_texts(markdown: &str) -> HashMap<usize, String> {
    let mut texts = HashMap::new();
    let mut current: Option<(usize, String)> = None;

    for (event, range) in Parser::new_ext(markdown, parser_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { .. }) => current = Some((range.start, String::new())),
            Event::End(TagEnd::Heading(_)) => {
                if let Some((start, text)) = current.take() {
                    texts.insert(start, text);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, heading)) = current.as_mut() {
                    heading.push_str(&text);
                }
            }
            _ => {}
        }
    }

    texts
}

/// Drop an ATX closing sequence: trailing `#`s after a space, or only `#`s
fn strip_closing_sequence(text: &str) -> &str {
    let open = text.trim_end_matches('#');
    if open.len() == text.len() {
        text
    } else if open.is_empty() {
        open
    } else if open.ends_with([' ', '\t']) {
        open.trim_end()
    } else {
        text
    }
}

/// Entries shown in the inline quick-nav above the article
pub fn top_level(toc: &[TocEntry]) -> Vec<&TocEntry> {
    toc.iter().filter(|e| e.indent_level == 0).collect()
}

/// Outline memoized for the last content value it was built from
#[derive(Debug, Default)]
pub struct OutlineMemo {
    source: Option<String>,
    entries: Vec<TocEntry>,
}

impl OutlineMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline of `content`, rebuilt only when `content` changed
    pub fn outline(&mut self, content: &str) -> &[TocEntry] {
        if self.source.as_deref() != Some(content) {
            self.entries = build_toc(content);
            self.source = Some(content.to_string());
        }
        &self.entries
    }
}
