//! HTML rendering of parsed blocks into Anki note fields.

use html_escape::encode_text;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::enumerate::enumerate_clozes;
use crate::types::{AnkiNote, Cloze, ClozePart, RoamBlock, RoamPart};

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(" {2,}").expect("valid space pattern"));

/// Escape text for HTML, keep repeated spaces visible and turn newlines into
/// line breaks. Single spaces are left alone.
pub fn format_text(text: &str) -> String {
    let escaped = encode_text(text);
    let spaced = SPACE_RUN.replace_all(&escaped, |captures: &Captures| {
        "&nbsp;".repeat(captures[0].len())
    });
    spaced.replace('\n', "<br/>")
}

/// Escaped code wrapped in `<code>`, whitespace kept verbatim.
pub fn format_code(code: &str) -> String {
    format!("<code>{}</code>", encode_text(code))
}

fn format_math(math: &str) -> String {
    format!("\\({}\\)", format_text(math))
}

fn format_code_block(code: &str) -> String {
    format!("<pre>{}</pre>", format_code(code))
}

pub fn format_cloze_part(part: &ClozePart) -> String {
    match part {
        ClozePart::Text(text) => format_text(text),
        ClozePart::Math(math) => format_math(math),
        ClozePart::CodeBlock(code) => format_code_block(code),
        ClozePart::CodeInline(code) => format_code(code),
    }
}

fn format_cloze_parts(parts: &[ClozePart]) -> String {
    parts.iter().map(format_cloze_part).collect()
}

/// Render `{{cN::content::hint}}`.
///
/// # Panics
///
/// Panics if the cloze has no valid number. Run [`enumerate_clozes`] first.
pub fn format_cloze(cloze: &Cloze) -> String {
    let Some(number) = cloze.valid_number() else {
        panic!("cannot render cloze without a valid number: {cloze:?}");
    };

    let hint = cloze
        .hint
        .as_deref()
        .map(|hint| format!("::{}", format_cloze_parts(hint)))
        .unwrap_or_default();

    format!("{{{{c{number}::{}{hint}}}}}", format_cloze_parts(&cloze.parts))
}

pub fn format_roam_part(part: &RoamPart) -> String {
    match part {
        RoamPart::Text(text) => format_text(text),
        RoamPart::Cloze(cloze) => format_cloze(cloze),
        RoamPart::Math(math) => format_math(math),
        RoamPart::CodeBlock(code) => format_code_block(code),
        RoamPart::CodeInline(code) => format_code(code),
        RoamPart::ColonCommand { command, content } => {
            format!(":{command}{}", encode_text(content))
        }
        RoamPart::CurlyCommand(content) => format!("{{{{{}}}}}", encode_text(content)),
    }
}

pub fn format_roam_parts(parts: &[RoamPart]) -> String {
    parts.iter().map(format_roam_part).collect()
}

/// Number the block's clozes and render both note fields.
pub fn make_anki_note(block: &RoamBlock) -> AnkiNote {
    let parts = enumerate_clozes(&block.parts);
    AnkiNote::new(format_roam_parts(&parts), format_text(&block.source))
}
