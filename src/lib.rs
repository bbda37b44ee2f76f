//! argv-tokenizer: contextual tokenizer for shell-like command strings.
//!
//! Commands are split into words with quoting (`'…'`, `"…"`), backslash
//! escapes, ANSI-C strings (`$'…'`), and `$(…)` command-substitution
//! placeholders. Every [`Token`](parse::Token) keeps both its logical value
//! and the exact source text, so the input can be reconstructed with
//! [`stringify`](parse::stringify).
//!
//! # Architecture
//!
//! - **[`parse`]**: The engine: context registry, rule dispatch, token scanner, driver, escape decoders, serializer.
//! - **[`eval`]**: Splicing evaluated substitutions back into token content.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: Logger setup and per-parse records in `~/.local/share/argv-tokenizer/tokenizer.log`.
//! - **[`error`]**: Error type shared by registration and parsing.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Error type and result alias.
pub mod error;
/// Splicing evaluated interpolations into tokens.
pub mod eval;
/// Logger installation and parse records.
pub mod logging;
/// Contexts, rules, scanning, and serialization.
pub mod parse;

use std::sync::OnceLock;

pub use error::{Result, TokenizerError};
use parse::{Argv, Tokenizer};

/// The tokenizer built from the embedded default configuration.
fn default_tokenizer() -> Result<&'static Tokenizer> {
    static DEFAULT: OnceLock<Result<Tokenizer>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| Tokenizer::from_config(&config::Config::default_config()))
        .as_ref()
        .map_err(Clone::clone)
}

/// Parse a command string with the default contexts.
///
/// This is the main entry point for tests and simple usage.
/// For user configuration or custom contexts, build a [`Tokenizer`] directly.
pub fn split(command: &str) -> Result<Argv> {
    default_tokenizer()?.parse(command)
}

/// The logical words of a command.
///
/// Fatal tokenizer errors are returned rather than papered over; a
/// recoverable one stays on [`Argv::error`] and the words are still produced.
pub fn tokenize(command: &str) -> Result<Vec<String>> {
    split(command).map(|argv| argv.words())
}
