//! The tokenizer instance: a registry, a depth limit, and a pattern cache.

use log::debug;

use super::driver;
use super::escape;
use super::lexer::{self, Scanned};
use super::pattern::{Pattern, PatternCache};
use super::registry::{Definition, ParseFn, Registry, Rule};
use super::types::{Argv, Inline};
use crate::config::{Config, Features};
use crate::error::{Result, TokenizerError};

/// Nesting limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Arguments of a driver-level parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Ends the parse; the matched text is consumed.
    pub terminator: Pattern,
    /// Separates tokens.
    pub delimiter: Pattern,
    /// Context the scan starts in.
    pub context: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            terminator: Pattern::Never,
            delimiter: Pattern::Whitespace,
            context: String::new(),
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn terminator(mut self, terminator: impl Into<Pattern>) -> Self {
        self.terminator = terminator.into();
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<Pattern>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

/// A tokenizer together with the nesting depth of the current parse.
///
/// Handed to every custom rule parser so it can recurse through the same
/// tokenizer without capturing it.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'t> {
    tokenizer: &'t Tokenizer,
    depth: usize,
}

impl<'t> Scope<'t> {
    pub(crate) fn root(tokenizer: &'t Tokenizer) -> Self {
        Self {
            tokenizer,
            depth: 0,
        }
    }

    pub fn tokenizer(&self) -> &'t Tokenizer {
        self.tokenizer
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Scope one level deeper, failing once the limit is exceeded.
    pub(crate) fn enter(&self) -> Result<Scope<'t>> {
        let depth = self.depth + 1;
        if depth > self.tokenizer.max_depth {
            return Err(TokenizerError::DepthExceeded {
                limit: self.tokenizer.max_depth,
            });
        }
        Ok(Scope {
            tokenizer: self.tokenizer,
            depth,
        })
    }

    /// Run the driver at this depth.
    pub fn parse(&self, source: &str, options: &ParseOptions) -> Result<Argv> {
        driver::parse(self, source, options)
    }
}

/// Contextual shell-word tokenizer.
///
/// Register contexts with [`Tokenizer::define`] (or start from
/// [`Tokenizer::from_config`]), then call [`Tokenizer::parse`]. Registration
/// takes `&mut self` and parsing `&self`, so a populated tokenizer can be
/// shared across threads.
#[derive(Debug)]
pub struct Tokenizer {
    registry: Registry,
    max_depth: usize,
    patterns: PatternCache,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// An empty tokenizer: not even the root context is defined.
    pub fn new() -> Self {
        Self {
            registry: Registry::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            patterns: PatternCache::default(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// A tokenizer with the standard shell contexts enabled by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut tokenizer = Self::new().with_max_depth(config.limits.max_depth);
        tokenizer.install(&config.features)?;
        Ok(tokenizer)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    pub fn define(&mut self, definition: Definition) -> Result<()> {
        self.registry.define(definition)
    }

    /// Register a context opened by `initiator` in the root context, left
    /// unfolded unless `parse` says otherwise.
    pub fn interpolate(
        &mut self,
        initiator: &str,
        terminator: &str,
        parse: Option<ParseFn>,
    ) -> Result<()> {
        self.define(Definition {
            parse,
            ..Definition::new(initiator, terminator).depend("")
        })
    }

    pub fn lookup(&self, context: &str) -> Result<Vec<&Rule>> {
        self.registry.lookup(context)
    }

    /// Split `source` on whitespace in the root context.
    pub fn parse(&self, source: &str) -> Result<Argv> {
        self.parse_with(source, &ParseOptions::default())
    }

    pub fn parse_with(&self, source: &str, options: &ParseOptions) -> Result<Argv> {
        Scope::root(self).parse(source, options)
    }

    /// Scan a single token from `source` in `context`, stopping at `outer`,
    /// the context terminator, or the end of input.
    pub fn scan_token<'s>(
        &self,
        source: &'s str,
        outer: &Pattern,
        context: &str,
    ) -> Result<Scanned<'s>> {
        let outer = super::pattern::outer_stop(outer, &Pattern::Never);
        lexer::scan_token(&Scope::root(self), source, &outer, context)
    }

    /// Register the root context and the standard shell contexts.
    pub fn install(&mut self, features: &Features) -> Result<()> {
        self.define(Definition::new("", "").quoted(false))?;
        self.define(
            Definition {
                parse: Some(region("\"", "\"")),
                ..Definition::new("\"", "\"")
            }
            .depend(""),
        )?;
        self.define(
            Definition {
                parse: Some(region("'", "'")),
                ..Definition::new("'", "'")
            }
            .depend(""),
        )?;

        if features.interpolation {
            self.define(
                Definition::new("$(", ")")
                    .inherit("")
                    .quoted(false)
                    .depend("")
                    .depend("\""),
            )?;
        }

        if features.backslash_escapes {
            self.define(Definition::new("\\", "").depend("").parse(escape::bare))?;
            self.define(Definition::new("\\", "").depend("\"").parse(escape::quoted))?;
        }

        if features.ansi_c_quoting {
            self.define(
                Definition {
                    parse: Some(region("'", "$'")),
                    ..Definition::new("$'", "'")
                }
                .depend(""),
            )?;
            self.define(Definition::new("\\", "").depend("$'").parse(escape::ansi_c))?;
        }

        debug!(
            "installed standard contexts (interpolation: {}, backslash: {}, ansi-c: {})",
            features.interpolation, features.backslash_escapes, features.ansi_c_quoting
        );
        Ok(())
    }
}

/// A quoted region: no delimiter, closed by `terminator`, folded into the
/// surrounding word.
fn region(terminator: &'static str, context: &'static str) -> ParseFn {
    std::sync::Arc::new(move |scope: &Scope<'_>, source: &str| -> Result<Argv> {
        let options = ParseOptions::new()
            .terminator(Pattern::chars(terminator))
            .delimiter(Pattern::Never)
            .context(context);
        Ok(scope.parse(source, &options)?.with_inline(Inline::Fold))
    })
}
