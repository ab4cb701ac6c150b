//! Citation lookup and formatting.
//!
//! A block cites its origin with a nearby `source: <citation>` block. The
//! lookup order is the block's children, then its siblings (preferring the
//! first match after the block), then its ancestors from nearest to the page.

use std::ptr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::export::{Block, Node};
use crate::time::TimeFormatter;

static SOURCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*source(?:\s*:)+\s*(?P<source>.*?)\s*$").expect("valid source pattern")
});

/// Citation text of a `source:` block, trimmed. `None` for any other text.
pub fn extract_source(text: &str) -> Option<&str> {
    SOURCE_PATTERN
        .captures(text)
        .and_then(|captures| captures.name("source"))
        .map(|source| source.as_str())
}

/// Find the citation for `block`, given its ancestors from the page down to
/// its direct parent.
pub fn find_source<'a>(block: &'a Block, ancestors: &[Node<'a>]) -> Option<&'a str> {
    if let Some(source) = find_in_children(block) {
        return Some(source);
    }

    let parent = ancestors.last()?;
    find_in_siblings(block, parent.children()).or_else(|| find_in_ancestors(ancestors))
}

fn find_in_children(block: &Block) -> Option<&str> {
    block
        .children
        .iter()
        .find_map(|child| extract_source(&child.string))
}

fn find_in_siblings<'a>(block: &Block, siblings: &'a [Block]) -> Option<&'a str> {
    let mut before_block = None;
    let mut after_block = false;

    for sibling in siblings {
        if ptr::eq(sibling, block) {
            after_block = true;
            continue;
        }

        let Some(source) = extract_source(&sibling.string) else {
            continue;
        };

        if after_block {
            return Some(source);
        }
        before_block = Some(source);
    }

    before_block
}

fn find_in_ancestors<'a>(ancestors: &[Node<'a>]) -> Option<&'a str> {
    ancestors
        .iter()
        .rev()
        .find_map(|node| node.text().and_then(extract_source))
}

/// Builds the plain-text citation attached to every note.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceFormatter {
    time_formatter: TimeFormatter,
}

impl SourceFormatter {
    pub fn new(time_formatter: TimeFormatter) -> Self {
        Self { time_formatter }
    }

    /// Citation sentence with optional timestamps, preceded by the found
    /// source and a line break.
    pub fn format(&self, block: &Block, source: Option<&str>, page_title: &str) -> String {
        let mut citation = format!("Note from Roam page '{page_title}'");

        self.push_time(&mut citation, "created", block.create_time);
        self.push_time(&mut citation, "edited", block.edit_time);
        citation.push('.');

        match source {
            Some(source) => format!("{source}\n{citation}"),
            None => citation,
        }
    }

    fn push_time(&self, citation: &mut String, label: &str, millis: Option<i64>) {
        let Some(millis) = millis else {
            return;
        };

        match self.time_formatter.format(millis) {
            Some(time) => citation.push_str(&format!(", {label} at {time}")),
            None => tracing::warn!(millis, "Skipping out of range {} time in citation", label),
        }
    }
}
