//! Memory of notes imported by earlier runs.
//!
//! Notes are compared by a normalised form of their content so that small
//! edits to punctuation, markup or spacing in Roam do not produce a second
//! copy of the same card.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ImportError, Result};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

static CHARACTERS_TO_STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[!"'(),\-.:;?\[\]_`{}]"#).expect("valid strip pattern"));

/// Content with tags removed, entities decoded, punctuation dropped and
/// whitespace collapsed.
pub fn normalized_content(content: &str) -> String {
    let without_tags = HTML_TAG.replace_all(content, "");
    let decoded = html_escape::decode_html_entities(&without_tags);
    let stripped = CHARACTERS_TO_STRIP.replace_all(&decoded, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Set of normalised note contents.
#[derive(Debug, Clone, Default)]
pub struct NormalizedNotes {
    contents: HashSet<String>,
}

impl NormalizedNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, content: &str) -> bool {
        self.contents.contains(&normalized_content(content))
    }

    /// Remember `content`. Returns false if an equivalent note was already known.
    pub fn insert(&mut self, content: &str) -> bool {
        self.contents.insert(normalized_content(content))
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for NormalizedNotes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut notes = Self::new();
        for content in iter {
            notes.insert(content.as_ref());
        }
        notes
    }
}

/// JSON array of raw note contents kept between runs.
#[derive(Debug, Clone)]
pub struct AddedNotesFile {
    path: PathBuf,
}

impl AddedNotesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Previously imported contents. A missing file means none.
    pub fn read(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ImportError::io(&self.path, e)),
        };

        serde_json::from_str(&content).map_err(|e| ImportError::json(&self.path, e))
    }

    pub fn write(&self, contents: &[String]) -> Result<()> {
        let json = serde_json::to_string(contents).map_err(|e| ImportError::json(&self.path, e))?;
        fs::write(&self.path, json).map_err(|e| ImportError::io(&self.path, e))
    }
}
