// src/gcode/parser.rs - Lenient single-line G-code tokenizer
//!
//! A line is split on whitespace after dropping any `;` comment. The first
//! token selects the command; the remaining tokens are `<letter><number>`
//! words. The number is the longest numeric prefix after the letter, so
//! `X10.5,` reads as `X10.5`. Words with no usable number are skipped, never
//! reported as errors, so odd slicer output passes straight through.

use std::str::SplitWhitespace;

/// Command word at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `G1`
    LinearMove,
    /// `G28`
    Home,
    /// `G92`
    SetPosition,
    /// Anything else; passed through untouched.
    Other(&'a str),
}

impl<'a> Command<'a> {
    fn from_token(token: &'a str) -> Self {
        match token {
            "G1" => Command::LinearMove,
            "G28" => Command::Home,
            "G92" => Command::SetPosition,
            other => Command::Other(other),
        }
    }
}

/// A parameter word such as `X10.5` or `F1200`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Word {
    pub letter: char,
    pub value: f64,
}

impl Word {
    /// Parse a single parameter token, reading the longest numeric prefix
    /// after the letter. Non-finite numbers are rejected.
    pub fn parse(token: &str) -> Option<Word> {
        let mut chars = token.chars();
        let letter = chars.next()?;
        let rest = chars.as_str();
        let numeric = rest
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
            .unwrap_or(rest.len());
        let value = (1..=numeric)
            .rev()
            .find_map(|end| rest[..end].parse::<f64>().ok())?;
        value.is_finite().then_some(Word { letter, value })
    }
}

/// A tokenized line: its command and the unparsed parameter text.
#[derive(Debug, Clone)]
pub struct GCodeLine<'a> {
    pub command: Command<'a>,
    args: &'a str,
}

impl<'a> GCodeLine<'a> {
    /// True when anything follows the command word, well-formed or not.
    pub fn has_params(&self) -> bool {
        !self.args.trim().is_empty()
    }

    /// Well-formed parameter words in order of appearance.
    pub fn words(&self) -> Words<'a> {
        Words {
            tokens: self.args.split_whitespace(),
        }
    }
}

/// Iterator over the parameter words of a line.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    tokens: SplitWhitespace<'a>,
}

impl Iterator for Words<'_> {
    type Item = Word;

    fn next(&mut self) -> Option<Word> {
        for token in self.tokens.by_ref() {
            match Word::parse(token) {
                Some(word) => return Some(word),
                None => tracing::debug!("Ignoring malformed parameter '{}'", token),
            }
        }
        None
    }
}

/// Strip the comment from `line` and split off the command token.
///
/// Returns `None` for blank and comment-only lines.
pub fn parse_line(line: &str) -> Option<GCodeLine<'_>> {
    let code = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let code = code.trim_start();
    let end = code.find(char::is_whitespace).unwrap_or(code.len());
    if end == 0 {
        return None;
    }
    Some(GCodeLine {
        command: Command::from_token(&code[..end]),
        args: &code[end..],
    })
}
