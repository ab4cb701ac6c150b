//! Core library for turning Roam Research exports into Anki cloze notes.
//!
//! Provides:
//! - Backtracking parser combinators and the Roam markup grammar
//! - Cloze numbering for clozes written without a number
//! - Citation lookup in the surrounding outline
//! - HTML rendering of notes for Anki
//!
//! No I/O happens here. Callers load [`Page`]s and hand the resulting
//! [`AnkiNote`]s to whatever stores them.

pub mod enumerate;
pub mod error;
pub mod export;
pub mod extract;
pub mod format;
pub mod parser;
pub mod source;
pub mod time;
pub mod types;

pub use enumerate::{enumerate_clozes, ClozeNumbering};
pub use error::{ParseError, Result, TimeZoneError};
pub use export::{Block, Node, Page};
pub use extract::NoteExtractor;
pub use format::{format_roam_parts, format_text, make_anki_note};
pub use parser::roam::{contains_cloze, parse_roam_block};
pub use source::{extract_source, find_source, SourceFormatter};
pub use time::{TimeFormatter, TimeZoneSetting};
pub use types::{AnkiNote, Cloze, ClozePart, RoamBlock, RoamPart};
