//! Backtracking parser combinators over a string and a byte offset.
//!
//! A parser is anything callable with an input string and an offset into it
//! that either returns a [`ParsedValue`] or fails with a recoverable
//! [`ParseError`]. A failed parser consumes nothing, so an alternative can
//! always be retried from the same offset.
//!
//! Rules are written as straight-line code with a [`Sequence`], which threads
//! the offset from one step to the next:
//!
//! ```ignore
//! fn bracketed(input: &str, offset: usize) -> ParseResult<String> {
//!     let mut seq = Sequence::new(input, offset);
//!     seq.then(&exact_string("["))?;
//!     let word = seq.then(&delimited_text("'", "'"))?;
//!     seq.then(&exact_string("]"))?;
//!     seq.finish(word)
//! }
//! ```
//!
//! Offsets are byte offsets and must fall on character boundaries. Calling a
//! parser with an offset past the end of the input, or a parser reporting more
//! consumed bytes than remain, is a bug in the caller and panics.

pub mod roam;

use regex::Regex;

use crate::error::ParseError;

/// Value produced by a successful parse together with the number of bytes it
/// consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedValue<T> {
    pub value: T,
    pub consumed: usize,
}

impl<T> ParsedValue<T> {
    pub fn new(value: T, consumed: usize) -> Self {
        Self { value, consumed }
    }

    /// Transform the value, keeping the consumed length.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParsedValue<U> {
        ParsedValue {
            value: f(self.value),
            consumed: self.consumed,
        }
    }
}

/// Outcome of running a parser.
pub type ParseResult<T> = std::result::Result<ParsedValue<T>, ParseError>;

/// A parser producing values of type `T`.
pub trait Parser<T> {
    fn parse(&self, input: &str, offset: usize) -> ParseResult<T>;
}

impl<T, F> Parser<T> for F
where
    F: Fn(&str, usize) -> ParseResult<T>,
{
    fn parse(&self, input: &str, offset: usize) -> ParseResult<T> {
        self(input, offset)
    }
}

/// Type-erased parser, used where alternatives of different concrete types
/// have to live in one list.
pub type BoxedParser<'a, T> = Box<dyn Fn(&str, usize) -> ParseResult<T> + 'a>;

/// Erase the concrete type of a parser.
pub fn boxed<'a, T>(parser: impl Parser<T> + 'a) -> BoxedParser<'a, T> {
    Box::new(move |input: &str, offset: usize| parser.parse(input, offset))
}

/// Panic unless `offset` is a valid position in `input`.
pub fn check_offset(input: &str, offset: usize) {
    assert!(
        offset <= input.len(),
        "parser offset {} is past the end of a {}-byte input",
        offset,
        input.len()
    );
    assert!(
        input.is_char_boundary(offset),
        "parser offset {} is not on a character boundary",
        offset
    );
}

/// Panic unless a parser started at `offset` may have consumed `consumed` bytes.
pub fn check_consumed(input: &str, offset: usize, consumed: usize) {
    assert!(
        consumed <= input.len() - offset,
        "parser consumed {} bytes but only {} remain after offset {}",
        consumed,
        input.len() - offset,
        offset
    );
    assert!(
        input.is_char_boundary(offset + consumed),
        "parser stopped inside a character at offset {}",
        offset + consumed
    );
}

/// Run `parser` and validate what it reports.
fn run_checked<T>(parser: &impl Parser<T>, input: &str, offset: usize) -> ParseResult<T> {
    let parsed = parser.parse(input, offset)?;
    check_consumed(input, offset, parsed.consumed);
    Ok(parsed)
}

/// Cursor for writing a rule as a sequence of steps.
///
/// Each step runs at the offset left by the previous one. A failing step
/// leaves the offset untouched, so callers may catch the error and try
/// something else.
#[derive(Debug)]
pub struct Sequence<'i> {
    input: &'i str,
    start: usize,
    offset: usize,
}

impl<'i> Sequence<'i> {
    pub fn new(input: &'i str, offset: usize) -> Self {
        check_offset(input, offset);
        Self {
            input,
            start: offset,
            offset,
        }
    }

    pub fn input(&self) -> &'i str {
        self.input
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Run the next step, advancing past whatever it consumed.
    pub fn then<T>(&mut self, parser: &impl Parser<T>) -> Result<T, ParseError> {
        let parsed = run_checked(parser, self.input, self.offset)?;
        self.offset += parsed.consumed;
        Ok(parsed.value)
    }

    /// Whether `parser` would succeed here. Never advances.
    pub fn peek<T>(&self, parser: &impl Parser<T>) -> bool {
        run_checked(parser, self.input, self.offset).is_ok()
    }

    /// Mismatch error at the current offset.
    pub fn mismatch(&self) -> ParseError {
        ParseError::Mismatch {
            offset: self.offset,
        }
    }

    /// Complete the rule, reporting everything consumed since it started.
    pub fn finish<T>(self, value: T) -> ParseResult<T> {
        Ok(ParsedValue::new(value, self.offset - self.start))
    }
}

/// Build a parser from a rule written against a [`Sequence`].
pub fn sequence<T, F>(rule: F) -> impl Fn(&str, usize) -> ParseResult<T>
where
    F: Fn(&mut Sequence<'_>) -> Result<T, ParseError>,
{
    move |input: &str, offset: usize| {
        let mut seq = Sequence::new(input, offset);
        let value = rule(&mut seq)?;
        seq.finish(value)
    }
}

/// Consume one character.
pub fn any_character(input: &str, offset: usize) -> ParseResult<char> {
    check_offset(input, offset);
    match input[offset..].chars().next() {
        Some(character) => Ok(ParsedValue::new(character, character.len_utf8())),
        None => Err(ParseError::EndOfInput { offset }),
    }
}

/// Match `expected` literally.
pub fn exact_string(
    expected: impl Into<String>,
) -> impl Fn(&str, usize) -> ParseResult<String> {
    let expected = expected.into();
    move |input: &str, offset: usize| {
        check_offset(input, offset);
        if input[offset..].starts_with(expected.as_str()) {
            Ok(ParsedValue::new(expected.clone(), expected.len()))
        } else {
            Err(ParseError::Mismatch { offset })
        }
    }
}

/// Match `character` only when it is not part of a run of the same character,
/// i.e. neither the preceding nor the following character equals it.
pub fn lone_character(character: char) -> impl Fn(&str, usize) -> ParseResult<char> {
    move |input: &str, offset: usize| {
        check_offset(input, offset);
        let rest = &input[offset..];
        if !rest.starts_with(character) {
            return Err(ParseError::Mismatch { offset });
        }

        let before = input[..offset].chars().next_back();
        let after = rest[character.len_utf8()..].chars().next();
        if before == Some(character) || after == Some(character) {
            return Err(ParseError::RepeatedDelimiter { offset });
        }

        Ok(ParsedValue::new(character, character.len_utf8()))
    }
}

/// Regular expression matched at the current offset.
#[derive(Debug, Clone)]
pub struct RegexParser {
    pattern: Regex,
}

impl RegexParser {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let anchored = Regex::new(&format!(r"\A(?:{})", pattern))?;
        Ok(Self { pattern: anchored })
    }
}

impl Parser<String> for RegexParser {
    fn parse(&self, input: &str, offset: usize) -> ParseResult<String> {
        check_offset(input, offset);
        match self.pattern.find(&input[offset..]) {
            Some(found) => Ok(ParsedValue::new(found.as_str().to_string(), found.end())),
            None => Err(ParseError::Mismatch { offset }),
        }
    }
}

/// Match a regular expression anchored at the current offset, consuming the
/// matched text.
pub fn regex(pattern: &str) -> Result<RegexParser, regex::Error> {
    RegexParser::new(pattern)
}

/// Succeed without consuming only at the very start of the input.
pub fn start_of_string(input: &str, offset: usize) -> ParseResult<()> {
    check_offset(input, offset);
    if offset == 0 {
        Ok(ParsedValue::new((), 0))
    } else {
        Err(ParseError::Mismatch { offset })
    }
}

/// Consume everything up to the end of the input.
pub fn rest_of_string(input: &str, offset: usize) -> ParseResult<String> {
    check_offset(input, offset);
    let rest = &input[offset..];
    Ok(ParsedValue::new(rest.to_string(), rest.len()))
}

/// Transform the value of a successful parse.
pub fn map<T, U, P, F>(parser: P, f: F) -> impl Fn(&str, usize) -> ParseResult<U>
where
    P: Parser<T>,
    F: Fn(T) -> U,
{
    move |input: &str, offset: usize| {
        run_checked(&parser, input, offset).map(|parsed| parsed.map(&f))
    }
}

/// Try each alternative in order at the same offset; the first success wins.
pub fn choose<'a, T: 'a>(
    alternatives: Vec<BoxedParser<'a, T>>,
) -> impl Fn(&str, usize) -> ParseResult<T> + 'a {
    move |input: &str, offset: usize| {
        check_offset(input, offset);
        for alternative in &alternatives {
            if let Ok(parsed) = run_checked(alternative, input, offset) {
                return Ok(parsed);
            }
        }
        Err(ParseError::NoAlternative { offset })
    }
}

/// Apply `parser` until it fails, collecting every value. Never fails itself.
///
/// Stops after a success that consumed nothing, since repeating it could
/// only produce the same value forever.
pub fn zero_or_more<T>(
    parser: impl Parser<T>,
) -> impl Fn(&str, usize) -> ParseResult<Vec<T>> {
    move |input: &str, offset: usize| {
        let mut seq = Sequence::new(input, offset);
        let mut values = Vec::new();
        loop {
            let before = seq.offset();
            match seq.then(&parser) {
                Ok(value) => values.push(value),
                Err(_) => break,
            }
            if seq.offset() == before {
                break;
            }
        }
        seq.finish(values)
    }
}

/// The value of `parser`, or `None` without consuming anything.
pub fn optional<T>(
    parser: impl Parser<T>,
) -> impl Fn(&str, usize) -> ParseResult<Option<T>> {
    move |input: &str, offset: usize| {
        check_offset(input, offset);
        match run_checked(&parser, input, offset) {
            Ok(parsed) => Ok(parsed.map(Some)),
            Err(_) => Ok(ParsedValue::new(None, 0)),
        }
    }
}

/// Whether `parser` matches here. Never consumes.
pub fn peek<T>(parser: impl Parser<T>) -> impl Fn(&str, usize) -> ParseResult<bool> {
    move |input: &str, offset: usize| {
        check_offset(input, offset);
        let matched = run_checked(&parser, input, offset).is_ok();
        Ok(ParsedValue::new(matched, 0))
    }
}

/// Consume `open`, then characters one at a time until `close` matches,
/// returning the text in between. `close` is tried before every character.
pub fn delimited_by<O, C>(
    open: impl Parser<O>,
    close: impl Parser<C>,
) -> impl Fn(&str, usize) -> ParseResult<String> {
    move |input: &str, offset: usize| {
        let mut seq = Sequence::new(input, offset);
        seq.then(&open)?;

        let mut text = String::new();
        loop {
            if seq.then(&close).is_ok() {
                return seq.finish(text);
            }
            match seq.then(&any_character) {
                Ok(character) => text.push(character),
                Err(_) => return Err(ParseError::Unterminated { offset }),
            }
        }
    }
}

/// Text between two literal delimiters, closed by the first `close` after
/// `open`.
pub fn delimited_text(
    open: impl Into<String>,
    close: impl Into<String>,
) -> impl Fn(&str, usize) -> ParseResult<String> {
    delimited_by(exact_string(open), exact_string(close))
}

/// Turn a parser into a function that must consume the whole input.
pub fn full_parser<T>(parser: impl Parser<T>) -> impl Fn(&str) -> Result<T, ParseError> {
    move |input: &str| {
        let parsed = run_checked(&parser, input, 0)?;
        if parsed.consumed != input.len() {
            return Err(ParseError::Incomplete {
                consumed: parsed.consumed,
                length: input.len(),
            });
        }
        Ok(parsed.value)
    }
}
