//! Grammar for the subset of Roam markup needed to find clozes.
//!
//! # Format
//! ```text
//! {answer}                single brace: cloze, numbered later
//! {c2::answer::hint}      explicit number and hint
//! {{embed [[Page]]}}      double brace: opaque curly command
//! :hiccup [:b "text"]     colon command, only at the start of a block
//! $$\frac{1}{2}$$         math
//! ```code```  `code`      code block and inline code
//! ```
//!
//! Anything else is plain text, so parsing a block never fails.

use once_cell::sync::Lazy;

use super::{
    any_character, boxed, choose, delimited_by, delimited_text, exact_string, full_parser,
    lone_character, map, optional, regex, rest_of_string, start_of_string, zero_or_more,
    ParseResult, Parser, RegexParser, Sequence,
};
use crate::error::{ParseError, Result};
use crate::types::{coalesce_text, Cloze, ClozePart, RoamPart};

/// Keywords recognised after a leading `:`.
pub const COLON_COMMANDS: [&str; 4] = ["diagram", "hiccup", "img", "q"];

const HINT_SEPARATOR: &str = "::";

static DIGITS: Lazy<RegexParser> =
    Lazy::new(|| regex("[0-9]+").expect("digit pattern is a valid regex"));

/// Parse the text of one block into its parts.
///
/// Adjacent plain characters are merged into a single text part. The grammar
/// accepts every input, so an error here means the grammar itself is broken.
pub fn parse_roam_block(text: &str) -> Result<Vec<RoamPart>> {
    full_parser(roam_parts)(text)
}

/// Whether any part is a cloze.
pub fn contains_cloze(parts: &[RoamPart]) -> bool {
    parts.iter().any(|part| part.as_cloze().is_some())
}

fn roam_parts(input: &str, offset: usize) -> ParseResult<Vec<RoamPart>> {
    let roam_part = choose(vec![
        boxed(colon_command),
        boxed(curly_command),
        boxed(map(cloze, RoamPart::Cloze)),
        boxed(map(math, RoamPart::Math)),
        boxed(map(code_block, RoamPart::CodeBlock)),
        boxed(map(code_inline, RoamPart::CodeInline)),
        boxed(map(any_character, |character: char| {
            RoamPart::Text(character.to_string())
        })),
    ]);

    let mut seq = Sequence::new(input, offset);
    let parts = seq.then(&zero_or_more(roam_part))?;
    seq.finish(coalesce_text(parts))
}

/// `:keyword rest of block`, only at offset zero.
fn colon_command(input: &str, offset: usize) -> ParseResult<RoamPart> {
    let mut seq = Sequence::new(input, offset);
    seq.then(&start_of_string)?;
    seq.then(&exact_string(":"))?;

    let keyword = choose(
        COLON_COMMANDS
            .iter()
            .map(|command| boxed(exact_string(*command)))
            .collect(),
    );
    let command = seq.then(&keyword)?;
    let content = seq.then(&rest_of_string)?;
    seq.finish(RoamPart::ColonCommand { command, content })
}

/// `}}` that is not followed by a further `}`, so a run of closing braces
/// ends the command at its last pair.
fn curly_close(input: &str, offset: usize) -> ParseResult<()> {
    let mut seq = Sequence::new(input, offset);
    seq.then(&exact_string("}}"))?;
    if seq.input()[seq.offset()..].starts_with('}') {
        return Err(ParseError::RepeatedDelimiter { offset });
    }
    seq.finish(())
}

/// `{{…}}` captured verbatim. Braces inside are not balanced:
/// `{{{}}` holds `{` and `{{}}}` holds `}`.
fn curly_command(input: &str, offset: usize) -> ParseResult<RoamPart> {
    delimited_by(exact_string("{{"), curly_close)
        .parse(input, offset)
        .map(|parsed| parsed.map(RoamPart::CurlyCommand))
}

fn cloze_open(input: &str, offset: usize) -> ParseResult<char> {
    lone_character('{').parse(input, offset)
}

fn cloze_close(input: &str, offset: usize) -> ParseResult<char> {
    lone_character('}').parse(input, offset)
}

fn hint_separator(input: &str, offset: usize) -> ParseResult<String> {
    exact_string(HINT_SEPARATOR).parse(input, offset)
}

/// `{[cN::]content[::hint]}`
fn cloze(input: &str, offset: usize) -> ParseResult<Cloze> {
    let mut seq = Sequence::new(input, offset);
    seq.then(&cloze_open)?;
    let number = seq.then(&optional(cloze_number))?;
    let parts = seq.then(&cloze_content)?;
    let hint = seq.then(&optional(cloze_hint))?;
    seq.then(&cloze_close)?;
    seq.finish(Cloze {
        parts,
        hint,
        number,
    })
}

/// `cN::` prefix giving an explicit cloze number.
fn cloze_number(input: &str, offset: usize) -> ParseResult<u32> {
    let mut seq = Sequence::new(input, offset);
    seq.then(&exact_string("c"))?;
    let digits_at = seq.offset();
    let digits = seq.then(&*DIGITS)?;
    let number = digits
        .parse::<u32>()
        .map_err(|_| ParseError::Mismatch { offset: digits_at })?;
    seq.then(&hint_separator)?;
    seq.finish(number)
}

fn cloze_part() -> impl Fn(&str, usize) -> ParseResult<ClozePart> {
    choose(vec![
        boxed(map(math, ClozePart::Math)),
        boxed(map(code_block, ClozePart::CodeBlock)),
        boxed(map(code_inline, ClozePart::CodeInline)),
        boxed(map(any_character, |character: char| {
            ClozePart::Text(character.to_string())
        })),
    ])
}

/// Cloze parts up to the hint separator or the closing brace.
fn cloze_content(input: &str, offset: usize) -> ParseResult<Vec<ClozePart>> {
    let part = cloze_part();
    let mut seq = Sequence::new(input, offset);
    let mut parts = Vec::new();
    while !seq.peek(&hint_separator) && !seq.peek(&cloze_close) {
        parts.push(seq.then(&part)?);
    }
    seq.finish(coalesce_text(parts))
}

/// `::hint` up to the closing brace.
fn cloze_hint(input: &str, offset: usize) -> ParseResult<Vec<ClozePart>> {
    let part = cloze_part();
    let mut seq = Sequence::new(input, offset);
    seq.then(&hint_separator)?;
    let mut parts = Vec::new();
    while !seq.peek(&cloze_close) {
        parts.push(seq.then(&part)?);
    }
    seq.finish(coalesce_text(parts))
}

fn math(input: &str, offset: usize) -> ParseResult<String> {
    delimited_text("$$", "$$").parse(input, offset)
}

fn code_block(input: &str, offset: usize) -> ParseResult<String> {
    delimited_text("```", "```").parse(input, offset)
}

fn code_inline(input: &str, offset: usize) -> ParseResult<String> {
    delimited_text("`", "`").parse(input, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(text: &str) -> Vec<RoamPart> {
        parse_roam_block(text).unwrap()
    }

    fn text_cloze(text: &str) -> Cloze {
        Cloze::new(vec![ClozePart::text(text)])
    }

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(parse("text"), vec![RoamPart::text("text")]);
    }

    #[test]
    fn test_parse_empty_block() {
        assert_eq!(parse(""), vec![]);
    }

    #[test]
    fn test_parse_cloze() {
        assert_eq!(parse("{cloze}"), vec![RoamPart::Cloze(text_cloze("cloze"))]);
    }

    #[test]
    fn test_parse_curly_command() {
        assert_eq!(
            parse("{{content}}"),
            vec![RoamPart::CurlyCommand("content".to_string())]
        );
    }

    #[rstest]
    #[case("{{{}}", "{")]
    #[case("{{}}}", "}")]
    #[case("{{a}}}}", "a}}")]
    fn test_curly_command_delimiters_are_not_balanced(#[case] text: &str, #[case] content: &str) {
        assert_eq!(parse(text), vec![RoamPart::CurlyCommand(content.to_string())]);
    }

    #[test]
    fn test_malformed_double_brackets_are_text() {
        assert_eq!(parse("{ {content}}"), vec![RoamPart::text("{ {content}}")]);
    }

    #[test]
    fn test_single_brackets_inside_curly_command() {
        let text = " query: {and: [[TODO]]} ";
        assert_eq!(
            parse(&format!("{{{{{}}}}}", text)),
            vec![RoamPart::CurlyCommand(text.to_string())]
        );
    }

    #[test]
    fn test_colon_command_keeps_rest_verbatim() {
        assert_eq!(
            parse(":hiccup {text}"),
            vec![RoamPart::ColonCommand {
                command: "hiccup".to_string(),
                content: " {text}".to_string(),
            }]
        );
    }

    #[test]
    fn test_colon_command_may_run_into_content() {
        assert_eq!(
            parse(":hiccuptext"),
            vec![RoamPart::ColonCommand {
                command: "hiccup".to_string(),
                content: "text".to_string(),
            }]
        );
    }

    #[rstest]
    #[case(" :hiccup text")]
    #[case(": hiccup text")]
    #[case(":unknown text")]
    #[case("text :q x")]
    fn test_colon_command_only_at_start_with_known_keyword(#[case] text: &str) {
        assert_eq!(parse(text), vec![RoamPart::text(text)]);
    }

    #[test]
    fn test_code_inline_hides_cloze() {
        assert_eq!(parse("`{code}`"), vec![RoamPart::CodeInline("{code}".to_string())]);
    }

    #[test]
    fn test_code_block_hides_cloze() {
        assert_eq!(parse("```{code}```"), vec![RoamPart::CodeBlock("{code}".to_string())]);
    }

    #[test]
    fn test_cloze_may_span_lines() {
        assert_eq!(parse("{con\ntent}"), vec![RoamPart::Cloze(text_cloze("con\ntent"))]);
    }

    #[test]
    fn test_cloze_with_hint() {
        assert_eq!(
            parse("{content::hint}"),
            vec![RoamPart::Cloze(
                text_cloze("content").with_hint(vec![ClozePart::text("hint")])
            )]
        );
    }

    #[test]
    fn test_cloze_with_number() {
        assert_eq!(
            parse("{c0::content}"),
            vec![RoamPart::Cloze(text_cloze("content").with_number(0))]
        );
    }

    #[test]
    fn test_cloze_with_number_and_hint() {
        assert_eq!(
            parse("{c12::content::hint}"),
            vec![RoamPart::Cloze(
                text_cloze("content")
                    .with_hint(vec![ClozePart::text("hint")])
                    .with_number(12)
            )]
        );
    }

    #[test]
    fn test_hint_keeps_later_separators() {
        assert_eq!(
            parse("{a::b::c}"),
            vec![RoamPart::Cloze(text_cloze("a").with_hint(vec![ClozePart::text("b::c")]))]
        );
    }

    #[test]
    fn test_number_without_separator_is_content() {
        assert_eq!(parse("{c1}"), vec![RoamPart::Cloze(text_cloze("c1"))]);
    }

    #[test]
    fn test_oversized_number_is_content() {
        assert_eq!(
            parse("{c99999999999::x}"),
            vec![RoamPart::Cloze(
                text_cloze("c99999999999").with_hint(vec![ClozePart::text("x")])
            )]
        );
    }

    #[test]
    fn test_cloze_then_text() {
        assert_eq!(
            parse("{c1::content} text"),
            vec![
                RoamPart::Cloze(text_cloze("content").with_number(1)),
                RoamPart::text(" text"),
            ]
        );
    }

    #[test]
    fn test_text_then_cloze() {
        assert_eq!(
            parse("text{c1::content}"),
            vec![
                RoamPart::text("text"),
                RoamPart::Cloze(text_cloze("content").with_number(1)),
            ]
        );
    }

    #[test]
    fn test_parse_math() {
        assert_eq!(
            parse(r"$$\textrm{math}$$"),
            vec![RoamPart::Math(r"\textrm{math}".to_string())]
        );
    }

    #[test]
    fn test_cloze_containing_math() {
        assert_eq!(
            parse(r"{$$\textrm{math}$$}"),
            vec![RoamPart::Cloze(Cloze::new(vec![ClozePart::Math(
                r"\textrm{math}".to_string()
            )]))]
        );
    }

    #[test]
    fn test_cloze_containing_code_inline() {
        assert_eq!(
            parse("{`code``code`}"),
            vec![RoamPart::Cloze(Cloze::new(vec![
                ClozePart::CodeInline("code".to_string()),
                ClozePart::CodeInline("code".to_string()),
            ]))]
        );
    }

    #[test]
    fn test_cloze_containing_code_block() {
        assert_eq!(
            parse("{```co``de```}"),
            vec![RoamPart::Cloze(Cloze::new(vec![ClozePart::CodeBlock(
                "co``de".to_string()
            )]))]
        );
    }

    #[test]
    fn test_code_in_hint() {
        assert_eq!(
            parse("{answer::see `x`}"),
            vec![RoamPart::Cloze(text_cloze("answer").with_hint(vec![
                ClozePart::text("see "),
                ClozePart::CodeInline("x".to_string()),
            ]))]
        );
    }

    #[test]
    fn test_clozes_do_not_nest() {
        assert_eq!(
            parse("{a {b} c}"),
            vec![
                RoamPart::Cloze(text_cloze("a {b")),
                RoamPart::text(" c}"),
            ]
        );
    }

    #[test]
    fn test_unclosed_cloze_is_text() {
        assert_eq!(parse("}note{"), vec![RoamPart::text("}note{")]);
        assert_eq!(parse("{note"), vec![RoamPart::text("{note")]);
    }

    #[test]
    fn test_contains_cloze_detects_clozes() {
        assert!(contains_cloze(&parse("a {b}")));
        assert!(!contains_cloze(&parse("```{b}```")));
    }
}
