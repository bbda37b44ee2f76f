//! Backslash escape decoders.
//!
//! Each decoder runs right after a `\` has been consumed and returns a
//! one-token [`Argv`]: `content` is the decoded text, `raw` the source text
//! consumed after the backslash. When nothing can be decoded the backslash
//! is handed back literally and the input is left untouched.

use log::warn;

use super::tokenizer::Scope;
use super::types::{Argv, Inline, Token};
use crate::error::{Result, TokenizerError};

/// Characters a backslash may escape inside double quotes.
const QUOTED_ESCAPABLE: &[char] = &['$', '`', '"', '\\'];

/// Unquoted `\X`: any character stands for itself.
pub fn bare(_scope: &Scope<'_>, source: &str) -> Result<Argv> {
    let Some(c) = source.chars().next() else {
        return Ok(dangling());
    };
    let len = c.len_utf8();
    Ok(decoded(c, &source[..len], &source[len..]))
}

/// `\X` inside double quotes: only `$`, backtick, `"` and `\` are escapable.
pub fn quoted(_scope: &Scope<'_>, source: &str) -> Result<Argv> {
    match source.chars().next() {
        None => Ok(dangling()),
        Some(c) if QUOTED_ESCAPABLE.contains(&c) => Ok(decoded(c, &source[..1], &source[1..])),
        Some(_) => Ok(literal_backslash(source)),
    }
}

/// `\X` inside `$'…'`.
pub fn ansi_c(_scope: &Scope<'_>, source: &str) -> Result<Argv> {
    let Some(first) = source.chars().next() else {
        return Ok(dangling());
    };

    let mnemonic = match first {
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'e' | 'E' => Some('\x1b'),
        'f' => Some('\x0c'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0b'),
        '\\' | '\'' | '"' | '?' => Some(first),
        _ => None,
    };
    if let Some(c) = mnemonic {
        return Ok(decoded(c, &source[..1], &source[1..]));
    }

    let numeric = match first {
        'x' => digits(&source[1..], 16, 1, 2).map(|(value, len)| (char_or_replacement(value), 1 + len)),
        'u' => digits(&source[1..], 16, 4, 4).map(|(value, len)| (char_or_replacement(value), 1 + len)),
        'U' => digits(&source[1..], 16, 8, 8).map(|(value, len)| (char_or_replacement(value), 1 + len)),
        'c' => Some(control(&source[1..])),
        '0'..='7' => digits(source, 8, 1, 3).map(|(value, len)| (char_or_replacement(value), len)),
        _ => None,
    };
    match numeric {
        Some((c, len)) => Ok(decoded(c, &source[..len], &source[len..])),
        None => Ok(literal_backslash(source)),
    }
}

/// `\cX`: the control character for `X`, or a literal `c` leaving `X` unconsumed.
fn control(after: &str) -> (char, usize) {
    match after.chars().next() {
        Some(x) if (64..=127).contains(&(x as u32)) => (char_or_replacement(x as u32 % 32), 2),
        _ => ('c', 1),
    }
}

/// Parse between `min` and `max` leading ASCII digits of `radix`.
///
/// Returns the value and the number of bytes consumed.
fn digits(text: &str, radix: u32, min: usize, max: usize) -> Option<(u32, usize)> {
    let len = text
        .chars()
        .take(max)
        .take_while(|c| c.is_digit(radix))
        .count();
    if len < min {
        return None;
    }
    u32::from_str_radix(&text[..len], radix)
        .ok()
        .map(|value| (value, len))
}

/// Surrogates and out-of-range values have no `char`; they decode to U+FFFD.
fn char_or_replacement(value: u32) -> char {
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn decoded(c: char, raw: &str, rest: &str) -> Argv {
    Argv::from_tokens(vec![Token::decoded(c.to_string(), raw)])
        .with_rest(rest)
        .with_inline(Inline::Fold)
}

fn literal_backslash(source: &str) -> Argv {
    Argv::default().with_rest(source).with_inline(Inline::Strip)
}

fn dangling() -> Argv {
    warn!("no character follows backslash");
    literal_backslash("").with_error(TokenizerError::DanglingEscape)
}
