//! Error types shared by registration and parsing.

use thiserror::Error;

/// Errors raised while registering contexts or tokenizing input.
///
/// Every variant except [`TokenizerError::DanglingEscape`] is fatal and comes
/// back as an `Err`. A dangling escape is recoverable: it is attached to the
/// produced [`Argv`](crate::parse::Argv) and the caller decides what to do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizerError {
    /// A context id was redefined with a different terminator or parent.
    #[error("context \"{id}\" already exists with a different terminator or inherit")]
    ContextConflict { id: String },

    /// A rule for the same owner and initiator is already registered.
    #[error("rule for initiator \"{initiator}\" in context \"{owner}\" already exists")]
    DuplicateRule { owner: String, initiator: String },

    /// Parsing was requested in a context that was never defined.
    #[error("no context defined for \"{0}\"")]
    UnknownContext(String),

    /// Following `inherit` from this context loops back onto itself.
    #[error("inherit chain of context \"{0}\" is cyclic")]
    CyclicInherit(String),

    /// Input nests deeper than the configured maximum.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthExceeded { limit: usize },

    /// A caller-supplied delimiter or terminator pattern does not compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// A custom rule parser handed back a `rest` that is not a suffix of its input.
    #[error("parser for \"{initiator}\" returned a rest that is not a suffix of its input")]
    ForeignRest { initiator: String },

    /// A delimiter matched empty input and the scan made no progress.
    #[error("delimiter matched empty input; scan cannot advance")]
    Stalled,

    /// A backslash appeared at the very end of the input.
    #[error("no character follows backslash")]
    DanglingEscape,
}

pub type Result<T> = std::result::Result<T, TokenizerError>;
