//! The multi-token scan loop.

use std::mem;

use super::lexer;
use super::pattern;
use super::tokenizer::{ParseOptions, Scope};
use super::types::Argv;
use crate::error::{Result, TokenizerError};

/// Scan tokens until the terminator or the end of input.
///
/// Empty tokens (no content, no interpolations) are dropped; their source
/// text is kept as `leading` on the next token or as `trailing` on the
/// result, so the input can be reconstructed.
pub(crate) fn parse(scope: &Scope<'_>, source: &str, options: &ParseOptions) -> Result<Argv> {
    let outer = pattern::outer_stop(&options.delimiter, &options.terminator);
    let closing = match options.terminator.source() {
        Some(terminator) => Some(
            scope
                .tokenizer()
                .patterns()
                .get(&format!("^(?:{terminator})"))?,
        ),
        None => None,
    };
    let closes = |text: &str| closing.as_ref().is_some_and(|re| re.is_match(text));

    let mut argv = Argv::default();
    let mut pending = String::new();
    let mut terminator = String::new();
    let mut rest = source;

    while !rest.is_empty() && !(closes(rest) || closes(&terminator)) {
        let scanned = lexer::scan_token(scope, rest, &outer, &options.context)?;
        if scanned.rest.len() == rest.len() {
            return Err(TokenizerError::Stalled);
        }
        rest = scanned.rest;
        if argv.error.is_none() {
            argv.error = scanned.error;
        }

        let mut token = scanned.token;
        terminator.clone_from(&token.terminator);
        if token.is_empty() {
            pending.push_str(&token.raw);
            pending.push_str(&token.terminator);
        } else {
            token.leading = mem::take(&mut pending);
            argv.tokens.push(token);
        }
    }

    // The terminator was not swallowed by the last token; consume it here.
    if !closes(&terminator)
        && let Some(m) = closing.as_ref().and_then(|re| re.find(rest))
    {
        pending.push_str(m.as_str());
        terminator = m.as_str().to_string();
        rest = &rest[m.end()..];
    }

    argv.rest = rest.to_string();
    argv.terminator = terminator;
    argv.trailing = pending;
    Ok(argv)
}
