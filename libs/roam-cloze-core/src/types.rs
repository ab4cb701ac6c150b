//! Core types for Roam cloze translation.

use serde::{Deserialize, Serialize};

/// A piece of a parsed Roam block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RoamPart {
    Text(String),
    Cloze(Cloze),
    Math(String),
    CodeBlock(String),
    CodeInline(String),
    ColonCommand { command: String, content: String },
    CurlyCommand(String),
}

/// A piece of cloze content. Clozes never nest, so there is no cloze variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ClozePart {
    Text(String),
    Math(String),
    CodeBlock(String),
    CodeInline(String),
}

/// A masked answer span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cloze {
    pub parts: Vec<ClozePart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<Vec<ClozePart>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl Cloze {
    /// Unnumbered cloze without a hint.
    pub fn new(parts: Vec<ClozePart>) -> Self {
        Self {
            parts,
            hint: None,
            number: None,
        }
    }

    pub fn with_hint(mut self, hint: Vec<ClozePart>) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    /// Number usable in Anki output. Zero is not a valid cloze number.
    pub fn valid_number(&self) -> Option<u32> {
        self.number.filter(|number| *number > 0)
    }
}

impl RoamPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn as_cloze(&self) -> Option<&Cloze> {
        match self {
            Self::Cloze(cloze) => Some(cloze),
            _ => None,
        }
    }
}

impl ClozePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl From<Cloze> for RoamPart {
    fn from(cloze: Cloze) -> Self {
        Self::Cloze(cloze)
    }
}

/// Parts whose adjacent text runs can be merged.
pub(crate) trait TextPart: Sized {
    fn text_mut(&mut self) -> Option<&mut String>;
}

impl TextPart for RoamPart {
    fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl TextPart for ClozePart {
    fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Merge adjacent text parts so no two text parts are neighbours.
pub(crate) fn coalesce_text<P: TextPart>(parts: Vec<P>) -> Vec<P> {
    let mut merged: Vec<P> = Vec::with_capacity(parts.len());

    for mut part in parts {
        if let (Some(last), Some(text)) = (
            merged.last_mut().and_then(TextPart::text_mut),
            part.text_mut(),
        ) {
            last.push_str(text);
            continue;
        }
        merged.push(part);
    }

    merged
}

/// Parsed block that contains at least one cloze, with its plain-text citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoamBlock {
    pub parts: Vec<RoamPart>,
    pub source: String,
}

/// Rendered note ready to be added to Anki. Both fields are HTML.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnkiNote {
    pub content: String,
    pub source: String,
}

impl AnkiNote {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }
}
