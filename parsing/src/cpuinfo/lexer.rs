//! Small pattern extractors shared by the vendor handlers.
//!
//! Apart from [split_lines], everything in here works on a single line, terminator included.
use crate::NomError;
use nom::bytes::complete::{tag, take_till, take_while, take_while1};
use nom::character::complete::{alphanumeric1, digit1, satisfy};
use nom::combinator::recognize;
use nom::multi::{count, many0};
use nom::sequence::{pair, preceded, tuple};
use nom::IResult;

/// Whitespace as the dumps use it, which includes the ASCII file/group/record/unit separators
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

pub fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split a string into lines, keeping the terminator on each one.
///
/// `\r\n` and a lone `\r` both count as a line break.
pub fn split_lines(input: &str) -> Vec<String> {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split_inclusive('\n')
        .map(String::from)
        .collect()
}

/// Strip the line terminator (and anything after it)
fn line_body(line: &str) -> &str {
    match line.find('\n') {
        Some(end) => &line[..end],
        None => line,
    }
}

/// Every offset that directly follows a colon and one whitespace character, leftmost first
fn colon_value_offsets(line: &str) -> impl Iterator<Item = usize> + '_ {
    line.char_indices().filter_map(move |(i, c)| {
        if c != ':' {
            return None;
        }
        let next = line[i + 1..].chars().next()?;
        is_space(next).then(|| i + 1 + next.len_utf8())
    })
}

/// Everything after the first `": "` up to the end of the line
pub fn value_after_colon(line: &str) -> Option<&str> {
    let start = colon_value_offsets(line).next()?;
    Some(line_body(&line[start..]))
}

/// The text between the first `": "` and the last `" @"` that follows it.
///
/// If a `": "` has no `" @"` behind it the next `": "` is tried.
pub fn value_before_at(line: &str) -> Option<&str> {
    for start in colon_value_offsets(line) {
        let body = line_body(&line[start..]);
        let end = body
            .char_indices()
            .filter(|(i, c)| is_space(*c) && body[i + c.len_utf8()..].starts_with('@'))
            .map(|(i, _)| i)
            .last();
        if let Some(end) = end {
            return Some(&body[..end]);
        }
    }
    None
}

/// The run of digits and dots directly after the first `"@ "`, which may be empty
pub fn number_after_at(line: &str) -> Option<&str> {
    line.char_indices()
        .filter(|(_, c)| *c == '@')
        .find_map(|(i, _)| {
            let rest = &line[i + 1..];
            let ws = rest.chars().next().filter(|c| is_space(*c))?;
            let output: IResult<&str, &str> =
                take_while(|c: char| c.is_ascii_digit() || c == '.')(&rest[ws.len_utf8()..]);
            output.ok().map(|o| o.1)
        })
}

/// The first run of ascii digits anywhere in the input
pub fn first_digits(input: &str) -> Result<&str, NomError<'_>> {
    preceded(take_till(|c: char| c.is_ascii_digit()), digit1)(input).map(|o| o.1)
}

/// Collect every maximal run of characters matching `is_token`
fn tokens_by(input: &str, is_token: impl Fn(char) -> bool + Copy) -> Vec<&str> {
    let output: IResult<&str, Vec<&str>> =
        many0(preceded(take_till(is_token), take_while1(is_token)))(input);
    output.map(|o| o.1).unwrap_or_default()
}

/// Runs of `[0-9a-zA-Z-]`, how intel model names are chopped up
pub fn model_tokens(input: &str) -> Vec<&str> {
    tokens_by(input, |c| c.is_ascii_alphanumeric() || c == '-')
}

/// Pieces of the input separated by underscores and spaces
pub fn underscore_tokens(input: &str) -> Vec<&str> {
    tokens_by(input, |c| c != '_' && c != ' ')
}

/// Words, where a hyphen is allowed inside a word (`64-bit` stays one token)
pub fn word_tokens(input: &str) -> Vec<&str> {
    tokens_by(input, |c| is_word(c) || c == '-')
}

/// `AMD` followed by two whitespace separated alphanumeric words
fn amd_model(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        tag("AMD"),
        count(pair(satisfy(is_space), alphanumeric1), 2),
    )))(input)
}

/// Find the first place in the line where [amd_model] matches
pub fn find_amd_model(line: &str) -> Option<&str> {
    line.match_indices("AMD")
        .find_map(|(i, _)| amd_model(&line[i..]).ok().map(|o| o.1))
}
