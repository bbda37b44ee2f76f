//! Types produced by the tokenizer and consumed by evaluators.

use serde::Serialize;

use crate::error::TokenizerError;

/// How a nested sub-parse merges into the token that contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Inline {
    /// Left unfolded and recorded as an [`Interpolation`] for external evaluation.
    #[default]
    Defer,
    /// Nested content is folded in without its delimiters; `raw` keeps them.
    Fold,
    /// Initiator and terminator are kept literally in both `content` and `raw`.
    Plain,
    /// The nested region's source text becomes both `content` and `raw`.
    Strip,
}

/// One word of the command line.
///
/// `content` is the logical value after quote removal and escape decoding;
/// `raw` is the verbatim source text the word was scanned from. The two are
/// always written independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Token {
    pub content: String,
    pub raw: String,
    /// Set when the token was closed by its own context's terminator and that
    /// context is a quoting one.
    pub quoted: bool,
    /// The text that ended this token (a delimiter run, a closing quote, or
    /// empty at end of input).
    pub terminator: String,
    /// Unfolded sub-parses, ordered by position.
    pub inters: Vec<Interpolation>,
    /// Source text of tokens dropped by the driver right before this one
    /// (leading whitespace, empty quotes). Only used for reconstruction.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub leading: String,
}

impl Token {
    /// A token whose raw text mirrors its content.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            raw: content.clone(),
            content,
            ..Self::default()
        }
    }

    /// A token whose logical value differs from the source text it came from.
    pub fn decoded(content: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            raw: raw.into(),
            ..Self::default()
        }
    }

    /// A token with no content and no interpolations never reaches an [`Argv`].
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.inters.is_empty()
    }
}

/// A sub-parse deliberately not folded into its parent token.
///
/// `pos` is a byte offset into the owning token's `content`: the place where
/// the evaluated replacement belongs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpolation {
    pub pos: usize,
    pub initiator: String,
    #[serde(flatten)]
    pub argv: Argv,
}

/// The result of a parse: the tokens found plus the unconsumed suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Argv {
    pub tokens: Vec<Token>,
    /// Input left over after the terminator (empty for a top-level parse).
    pub rest: String,
    /// The text that closed this parse: the last token's terminator, or the
    /// terminator consumed from the remaining input.
    pub terminator: String,
    /// Source text scanned after the last kept token but not part of any token.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub trailing: String,
    /// Merge policy requested by a custom rule parser.
    #[serde(skip)]
    pub inline: Inline,
    /// First recoverable problem found anywhere in this parse.
    #[serde(skip)]
    pub error: Option<TokenizerError>,
}

impl Argv {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }

    pub fn with_rest(mut self, rest: impl Into<String>) -> Self {
        self.rest = rest.into();
        self
    }

    pub fn with_inline(mut self, inline: Inline) -> Self {
        self.inline = inline;
        self
    }

    pub fn with_error(mut self, error: TokenizerError) -> Self {
        self.error = Some(error);
        self
    }

    /// The logical value of every token, in order.
    pub fn words(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.content.clone()).collect()
    }
}
