pub mod driver;
pub mod escape;
pub mod lexer;
pub mod pattern;
pub mod registry;
pub mod stringify;
pub mod tokenizer;
pub mod types;

pub use lexer::Scanned;
pub use pattern::Pattern;
pub use registry::{Context, Definition, ParseFn, Registry, Rule};
pub use stringify::{Stringify, stringify};
pub use tokenizer::{DEFAULT_MAX_DEPTH, ParseOptions, Scope, Tokenizer};
pub use types::{Argv, Inline, Interpolation, Token};
