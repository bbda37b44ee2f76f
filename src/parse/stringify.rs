//! Reconstructing source text from a token tree.
//!
//! Unfolded interpolations are not part of their parent's `raw`, so they do
//! not reappear here; everything else does, byte for byte.

use super::types::{Argv, Interpolation, Token};

/// Types that can be rendered back to command text.
pub trait Stringify {
    fn stringify(&self) -> String;
}

impl Stringify for Token {
    fn stringify(&self) -> String {
        format!("{}{}{}", self.leading, self.raw, self.terminator)
    }
}

impl Stringify for Argv {
    fn stringify(&self) -> String {
        source_text(self)
    }
}

impl Stringify for Interpolation {
    /// The sub-expression alone: each token's raw text and terminator, minus
    /// the terminator of the last token, which belongs to the enclosing
    /// syntax.
    fn stringify(&self) -> String {
        let mut text: String = self
            .argv
            .tokens
            .iter()
            .map(|token| format!("{}{}", token.raw, token.terminator))
            .collect();
        if let Some(last) = self.argv.tokens.last() {
            text.truncate(text.len() - last.terminator.len());
        }
        text
    }
}

/// Render any token, argv, or interpolation.
pub fn stringify<T: Stringify + ?Sized>(value: &T) -> String {
    value.stringify()
}

/// Every byte the parse consumed, including the closing terminator and the
/// text of dropped tokens.
pub(crate) fn source_text(argv: &Argv) -> String {
    let mut text: String = argv.tokens.iter().map(Stringify::stringify).collect();
    text.push_str(&argv.trailing);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parse::Tokenizer;

    fn standard() -> Tokenizer {
        Tokenizer::from_config(&Config::default_config()).unwrap()
    }

    fn identity(source: &str) -> String {
        stringify(&standard().parse(source).unwrap())
    }

    #[test]
    fn plain_words_round_trip() {
        assert_eq!(identity("x y z"), "x y z");
        assert_eq!(identity("x \"yy\" 'zz'"), "x \"yy\" 'zz'");
        assert_eq!(identity("  a\t b  "), "  a\t b  ");
    }

    #[test]
    fn substitutions_are_not_reproduced() {
        assert_eq!(identity("x \"yy\" 'zz' $(aa)"), "x \"yy\" 'zz' ");
        assert_eq!(identity("$(1)"), "");
        assert_eq!(identity("$( 1 2 3   )"), "");
        assert_eq!(identity("\" a $(123) b $(456) c \""), "\" a  b  c \"");
    }

    #[test]
    fn unterminated_input_round_trips() {
        assert_eq!(identity("a \"1"), "a \"1");
        assert_eq!(identity("\"aa'55"), "\"aa'55");
        assert_eq!(identity("$'\\x"), "$'\\x");
        assert_eq!(identity("a\\"), "a\\");
    }

    #[test]
    fn escapes_round_trip() {
        assert_eq!(identity("a\\ b \"c\\d\\$\" $'\\n\\x41\\cA'"), "a\\ b \"c\\d\\$\" $'\\n\\x41\\cA'");
        assert_eq!(identity("'' \"\" x"), "'' \"\" x");
    }

    #[test]
    fn interpolation_trims_its_terminator() {
        let argv = standard().parse("\"x\" $(echo 1)").unwrap();
        assert_eq!(stringify(&argv.tokens[1].inters[0]), "echo 1");
    }

    #[test]
    fn interpolation_trims_padding_before_close() {
        let argv = standard().parse("$( 1 2 3   )").unwrap();
        assert_eq!(stringify(&argv.tokens[0].inters[0]), "1 2 3");
        let argv = standard().parse("x $(echo 1 )").unwrap();
        assert_eq!(stringify(&argv.tokens[1].inters[0]), "echo 1");
    }

    #[test]
    fn source_text_keeps_padding_and_close() {
        let argv = standard().parse("$( 1 2 3   )").unwrap();
        assert_eq!(source_text(&argv.tokens[0].inters[0].argv), " 1 2 3   )");
    }

    #[test]
    fn unterminated_interpolation_keeps_everything() {
        let argv = standard().parse("$(echo 1").unwrap();
        assert_eq!(stringify(&argv.tokens[0].inters[0]), "echo 1");
    }

    #[test]
    fn nested_interpolation_keeps_inner_gap() {
        let argv = standard().parse("a b$(xx $(yy d))c").unwrap();
        let outer = &argv.tokens[1].inters[0];
        assert_eq!(stringify(outer), "xx ");
        assert_eq!(stringify(&outer.argv.tokens[1].inters[0]), "yy d");
    }

    #[test]
    fn token_includes_leading_and_terminator() {
        let argv = standard().parse(" 'a' b").unwrap();
        assert_eq!(stringify(&argv.tokens[0]), " 'a' ");
        assert_eq!(stringify(&argv.tokens[1]), "b");
    }
}
