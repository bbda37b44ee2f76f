//! Splicing evaluated interpolations back into token content.
//!
//! The tokenizer only records where a substitution occurs. Running it is up
//! to an [`Evaluator`]; this module walks the token tree, asks the evaluator
//! for each replacement (innermost first), and splices the results in.

use crate::parse::stringify::source_text;
use crate::parse::{Argv, Interpolation, Token};

/// Produces the replacement text for one interpolation.
///
/// `words` are the nested tokens with their own interpolations already
/// expanded.
pub trait Evaluator {
    fn evaluate(&self, inter: &Interpolation, words: &[String]) -> String;
}

impl<F> Evaluator for F
where
    F: Fn(&Interpolation, &[String]) -> String,
{
    fn evaluate(&self, inter: &Interpolation, words: &[String]) -> String {
        self(inter, words)
    }
}

/// Renders a substitution as `[w1 w2 …]`, exposing its nesting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bracketed;

impl Evaluator for Bracketed {
    fn evaluate(&self, _inter: &Interpolation, words: &[String]) -> String {
        format!("[{}]", words.join(" "))
    }
}

/// Puts the substitution's source text back, unevaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl Evaluator for Verbatim {
    fn evaluate(&self, inter: &Interpolation, _words: &[String]) -> String {
        format!("{}{}", inter.initiator, source_text(&inter.argv))
    }
}

/// Expand every token of `argv`.
pub fn expand(argv: &Argv, evaluator: &dyn Evaluator) -> Vec<String> {
    argv.tokens
        .iter()
        .map(|token| expand_token(token, evaluator))
        .collect()
}

/// The token's content with every interpolation replaced.
///
/// Replacements are applied from the highest position down so that earlier
/// offsets stay valid; interpolations sharing a position keep their order.
pub fn expand_token(token: &Token, evaluator: &dyn Evaluator) -> String {
    let mut inters: Vec<&Interpolation> = token.inters.iter().collect();
    inters.sort_by_key(|inter| inter.pos);

    let mut content = token.content.clone();
    for inter in inters.into_iter().rev() {
        let words = expand(&inter.argv, evaluator);
        let replacement = evaluator.evaluate(inter, &words);
        let pos = if content.is_char_boundary(inter.pos) {
            inter.pos
        } else {
            content.len()
        };
        content.insert_str(pos, &replacement);
    }
    content
}
