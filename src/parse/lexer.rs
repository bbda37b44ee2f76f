//! Scanning a single token.
//!
//! A token grows from literal text until the stop pattern matches. Rule
//! initiators recurse into nested contexts and the result is folded into the
//! token (or recorded as an interpolation); anything else ends the token.

use log::trace;

use super::pattern;
use super::registry::Rule;
use super::stringify::source_text;
use super::tokenizer::{ParseOptions, Scope};
use super::types::{Argv, Inline, Interpolation, Token};
use super::Pattern;
use crate::error::{Result, TokenizerError};

/// A token together with the input that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned<'s> {
    pub token: Token,
    /// Input after the token's terminator.
    pub rest: &'s str,
    /// First recoverable problem met while scanning the token.
    pub error: Option<TokenizerError>,
}

/// Scan one token from `source` in `context_id`.
///
/// `outer` is the regex source of the stop handed down by the driver; it
/// always ends with an end-of-input alternative.
pub(crate) fn scan_token<'s>(
    scope: &Scope<'_>,
    source: &'s str,
    outer: &str,
    context_id: &str,
) -> Result<Scanned<'s>> {
    let tokenizer = scope.tokenizer();
    let registry = tokenizer.registry();
    let context = registry
        .context(context_id)
        .ok_or_else(|| TokenizerError::UnknownContext(context_id.to_string()))?;
    let rules = registry.lookup(context_id)?;
    let stop = tokenizer.patterns().get(&pattern::context_stop(
        outer,
        &context.terminator,
        rules.iter().map(|r| r.initiator.as_str()),
    ))?;

    let mut token = Token::default();
    let mut error = None;
    let mut source = source;
    loop {
        let (start, end) = stop
            .find(source)
            .map_or((source.len(), source.len()), |m| (m.start(), m.end()));
        let matched = &source[start..end];
        token.content.push_str(&source[..start]);
        token.raw.push_str(&source[..start]);

        // The context's own terminator outranks a rule with the same initiator.
        let is_terminator = !context.terminator.is_empty() && matched == context.terminator;
        let rule = if is_terminator {
            None
        } else {
            rules.iter().find(|r| r.initiator == matched)
        };

        let Some(rule) = rule else {
            token.quoted = is_terminator && context.quoted;
            token.terminator = matched.to_string();
            trace!("token {:?} ended by {:?}", token.content, matched);
            return Ok(Scanned {
                token,
                rest: &source[end..],
                error,
            });
        };

        source = &source[end..];
        let nested = scope.enter()?;
        let terminator = registry
            .context(&rule.context)
            .map_or("", |c| c.terminator.as_str());
        trace!(
            "entering {:?} from {:?} at depth {}",
            rule.context,
            context_id,
            nested.depth()
        );
        let argv = match &rule.parse {
            Some(parse) => parse(&nested, source)?,
            None => {
                let options = ParseOptions::new()
                    .terminator(Pattern::literal(terminator))
                    .delimiter(Pattern::Whitespace)
                    .context(rule.context.as_str());
                nested.parse(source, &options)?
            }
        };
        source = advance(source, &argv.rest, rule)?;
        if error.is_none() {
            error = argv.error.clone();
        }
        fold(&mut token, rule, terminator, argv);
    }
}

/// The suffix of `source` equal to `rest`.
fn advance<'s>(source: &'s str, rest: &str, rule: &Rule) -> Result<&'s str> {
    if source.ends_with(rest) {
        Ok(&source[source.len() - rest.len()..])
    } else {
        Err(TokenizerError::ForeignRest {
            initiator: rule.initiator.clone(),
        })
    }
}

/// Merge a nested parse into `token` according to its inline policy.
fn fold(token: &mut Token, rule: &Rule, terminator: &str, argv: Argv) {
    let initiator = rule.initiator.as_str();
    match argv.inline {
        Inline::Defer => {
            // An empty substitution leaves nothing to evaluate.
            if !argv.tokens.is_empty() {
                token.inters.push(Interpolation {
                    pos: token.content.len(),
                    initiator: initiator.to_string(),
                    argv,
                });
            }
        }
        Inline::Fold => {
            let text = source_text(&argv);
            absorb(token, argv.tokens);
            token.raw.push_str(initiator);
            token.raw.push_str(&text);
        }
        Inline::Plain => {
            let text = source_text(&argv);
            let closed = !terminator.is_empty() && argv.terminator == terminator;
            token.content.push_str(initiator);
            absorb(token, argv.tokens);
            if closed {
                token.content.push_str(terminator);
            }
            token.raw.push_str(initiator);
            token.raw.push_str(&text);
        }
        Inline::Strip => {
            let text = format!("{initiator}{}", source_text(&argv));
            token.content.push_str(&text);
            token.raw.push_str(&text);
        }
    }
}

/// Append nested token contents, separated by their terminators, shifting
/// their interpolations to offsets in `token`.
fn absorb(token: &mut Token, nested: Vec<Token>) {
    let mut separator = String::new();
    for inner in nested {
        token.content.push_str(&separator);
        let base = token.content.len();
        token.inters.extend(inner.inters.into_iter().map(|mut inter| {
            inter.pos += base;
            inter
        }));
        token.content.push_str(&inner.content);
        separator = inner.terminator;
    }
}
