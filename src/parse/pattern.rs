//! Stop patterns and the compiled-regex cache.
//!
//! Every scan searches for the leftmost of several alternatives: the outer
//! delimiter and terminator handed down by the driver, the active context's
//! own terminator, and every visible rule initiator. They are joined into one
//! regex whose alternation order encodes priority (leftmost-first).

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use regex::Regex;

use crate::error::{Result, TokenizerError};

/// A delimiter or terminator accepted by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Pattern {
    /// Matches nothing.
    #[default]
    Never,
    /// A run of whitespace.
    Whitespace,
    /// Any single character of the set.
    Chars(String),
    /// The exact text.
    Literal(String),
    /// A raw regular expression.
    Regex(String),
}

impl Pattern {
    pub fn chars(set: impl Into<String>) -> Self {
        let set = set.into();
        if set.is_empty() {
            Pattern::Never
        } else {
            Pattern::Chars(set)
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Pattern::Never
        } else {
            Pattern::Literal(text)
        }
    }

    pub fn regex(source: impl Into<String>) -> Self {
        Pattern::Regex(source.into())
    }

    /// Regex source for this pattern, or `None` when it matches nothing.
    pub(crate) fn source(&self) -> Option<String> {
        match self {
            Pattern::Never => None,
            Pattern::Whitespace => Some(r"\s+".to_string()),
            Pattern::Chars(set) => {
                let mut class = String::from("[");
                for c in set.chars() {
                    class.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
                }
                class.push(']');
                Some(class)
            }
            Pattern::Literal(text) => Some(regex::escape(text)),
            Pattern::Regex(source) => Some(format!("(?:{source})")),
        }
    }
}

impl From<&str> for Pattern {
    fn from(set: &str) -> Self {
        Pattern::chars(set)
    }
}

/// Source of the driver-level stop: delimiter, then terminator, then end of input.
pub(crate) fn outer_stop(delimiter: &Pattern, terminator: &Pattern) -> String {
    let mut stop = String::new();
    for part in [delimiter.source(), terminator.source()].into_iter().flatten() {
        stop.push_str(&part);
        stop.push('|');
    }
    stop.push_str(r"\z");
    stop
}

/// Source of a context-level stop.
///
/// Initiators are tried longest first so that `$(` wins over `$` at the
/// same position; the outer stop and the context terminator come before
/// all of them.
pub(crate) fn context_stop<'a>(
    outer: &str,
    terminator: &str,
    initiators: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut initiators: Vec<&str> = initiators.into_iter().collect();
    initiators.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut stop = outer.to_string();
    if !terminator.is_empty() {
        stop.push('|');
        stop.push_str(&regex::escape(terminator));
    }
    for initiator in initiators {
        stop.push('|');
        stop.push_str(&regex::escape(initiator));
    }
    stop
}

/// Compiled patterns keyed by their source.
#[derive(Debug, Default)]
pub(crate) struct PatternCache {
    compiled: RwLock<HashMap<String, Regex>>,
}

impl PatternCache {
    pub(crate) fn get(&self, source: &str) -> Result<Regex> {
        if let Some(regex) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
        {
            return Ok(regex.clone());
        }
        let regex = Regex::new(source).map_err(|e| TokenizerError::InvalidPattern(e.to_string()))?;
        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(source.to_string(), regex.clone());
        Ok(regex)
    }
}
