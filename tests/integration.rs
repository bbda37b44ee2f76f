use argv_tokenizer::config::{Config, Features};
use argv_tokenizer::eval::{Bracketed, expand};
use argv_tokenizer::parse::{Argv, Definition, Pattern, Tokenizer, stringify};
use argv_tokenizer::{TokenizerError, split, tokenize};

fn words(command: &str) -> Vec<String> {
    split(command).unwrap().words()
}

/// Pre-order list of every argv's words, descending into interpolations.
fn nested_words(command: &str) -> Vec<Vec<String>> {
    fn collect(argv: &Argv, out: &mut Vec<Vec<String>>) {
        out.push(argv.words());
        for token in &argv.tokens {
            for inter in &token.inters {
                collect(&inter.argv, out);
            }
        }
    }
    let mut out = Vec::new();
    collect(&split(command).unwrap(), &mut out);
    out
}

fn identity(command: &str) -> String {
    stringify(&split(command).unwrap())
}

fn with_features(features: Features) -> Tokenizer {
    let config = Config {
        features,
        ..Config::default_config()
    };
    Tokenizer::from_config(&config).unwrap()
}

macro_rules! words_test {
    ($name:ident, $cmd:expr, [$($word:expr),* $(,)?]) => {
        #[test]
        fn $name() {
            let expected: Vec<String> = vec![$($word.to_string()),*];
            assert_eq!(words($cmd), expected, "command: {:?}", $cmd);
        }
    };
}

// ── Whitespace splitting ──

words_test!(split_simple, "a b c", ["a", "b", "c"]);
words_test!(split_mixed_whitespace, "a b  c\t\r\n dd ", ["a", "b", "c", "dd"]);
words_test!(split_trim, " a ", ["a"]);
words_test!(split_empty, "", []);
words_test!(split_blank, " \t ", []);

// ── Quotes ──

words_test!(quote_separate, "a 'b' \"c\"", ["a", "b", "c"]);
words_test!(quote_adjacent_merge, "a 'b'\"c\"'d'", ["a", "bcd"]);
words_test!(
    quote_adjacent_with_bare,
    "a 'b'\"c\"'d'e 'f'\"g\" h",
    ["a", "bcde", "fg", "h"]
);
words_test!(quote_inside_other_quote, "a \"b\"'\"'\"c\" 'd'\"'\"'e'", ["a", "b\"c", "d'e"]);
words_test!(quote_bare_prefix, "f'a'\"f\"", ["faf"]);
words_test!(quote_mixed, "'a'f \"b\"'s\"'\"c\"g", ["af", "bs\"cg"]);
words_test!(quote_keeps_whitespace, "echo 'hello world'", ["echo", "hello world"]);
words_test!(quote_empty_dropped, "a '' \"\" b", ["a", "b"]);
words_test!(quote_unterminated, "a \"b c", ["a", "b c"]);

// ── Backslashes ──

words_test!(backslash_space, "a b\\ c", ["a", "b c"]);
words_test!(backslash_any, "a b\\ c\\r d\\\\", ["a", "b cr", "d\\"]);
words_test!(
    backslash_in_double_quotes,
    "a \"b\\ c\\\"\\$\\\\\\`\"",
    ["a", "b\\ c\"$\\`"]
);
words_test!(backslash_in_single_quotes, "a 'b\\ c'", ["a", "b\\ c"]);
words_test!(
    backslash_in_single_quotes_literal,
    "a 'b\\ c\\r' 'd\\\\'",
    ["a", "b\\ c\\r", "d\\\\"]
);
words_test!(backslash_dangling_kept, "a b\\", ["a", "b\\"]);

// ── ANSI-C strings ──

words_test!(
    ansi_c_mnemonics,
    "a $'\\ \\a\\b\\e\\E\\f\\n\\r\\t\\v'",
    ["a", "\\ \x07\x08\x1b\x1b\x0c\n\r\t\x0b"]
);
words_test!(
    ansi_c_numeric,
    "a $'\\ \\\\\\'\\\"\\012\\xAA\\u2001\\U0001F600'",
    ["a", "\\ \\'\"\n\u{AA}\u{2001}\u{1F600}"]
);
words_test!(ansi_c_adjacent, "x$'\\t'y", ["x\ty"]);
words_test!(ansi_c_no_escape_outside, "$'a' '\\n'", ["a", "\\n"]);

// ── Interpolation ──

#[test]
fn interpolation_structure() {
    assert_eq!(
        nested_words("a b$(xx $(yy d))c"),
        vec![vec!["a", "bc"], vec!["xx", ""], vec!["yy", "d"]]
    );
}

#[test]
fn interpolation_only_token() {
    assert_eq!(nested_words(" $( a ) "), vec![vec![""], vec!["a"]]);
    assert_eq!(nested_words(" \" $( a ) \" "), vec![vec!["  "], vec!["a"]]);
}

#[test]
fn interpolation_position_and_initiator() {
    let argv = split("pre$(cmd arg)post").unwrap();
    let token = &argv.tokens[0];
    assert_eq!(token.content, "prepost");
    assert_eq!(token.raw, "prepost");
    assert_eq!(token.inters[0].pos, 3);
    assert_eq!(token.inters[0].initiator, "$(");
    assert_eq!(token.inters[0].argv.words(), vec!["cmd", "arg"]);
}

#[test]
fn interpolation_not_in_single_quotes() {
    assert_eq!(words("'$(a)'"), vec!["$(a)"]);
}

#[test]
fn interpolation_splice_reconstructs_nesting() {
    for source in ["a b$(xx $(yy d))c", "a b$(x y z)c"] {
        let argv = split(source).unwrap();
        let spliced = format!("[{}]", expand(&argv, &Bracketed).join(" "));
        let expected = format!("[{}]", source.replace("$(", "[").replace(')', "]"));
        assert_eq!(spliced, expected);
    }
}

#[test]
fn quoted_flag_only_inside_quote_contexts() {
    let argv = split("'a' b").unwrap();
    assert!(!argv.tokens[0].quoted);
    let inner = split("\"x $(y) \"").unwrap();
    assert!(!inner.tokens[0].inters[0].argv.tokens[0].quoted);
}

// ── Stringify ──

#[test]
fn stringify_interpolation_trims_terminator() {
    let argv = split("\"x\" $(echo 1)").unwrap();
    assert_eq!(stringify(&argv.tokens[1].inters[0]), "echo 1");
    let argv = split("x $(echo 1 )").unwrap();
    assert_eq!(stringify(&argv.tokens[1].inters[0]), "echo 1");
    let argv = split("$( 1 2 3   )").unwrap();
    assert_eq!(stringify(&argv.tokens[0].inters[0]), "1 2 3");
}

#[test]
fn stringify_round_trips() {
    for source in [
        "x y z",
        "x \"yy\" 'zz'",
        "a \"1",
        "\"aa'55",
        " a  b ",
        "a\\ b \"\\q\" $'\\x4'",
    ] {
        assert_eq!(identity(source), source);
    }
}

#[test]
fn stringify_drops_substitutions() {
    assert_eq!(identity("x \"yy\" 'zz' $(aa)"), "x \"yy\" 'zz' ");
    assert_eq!(identity("$(1)"), "");
    assert_eq!(identity("$( 1 2 3   )"), "");
    assert_eq!(identity("\" a $(123) b $(456) c \""), "\" a  b  c \"");
}

// ── Errors ──

#[test]
fn dangling_escape_reported_not_fatal() {
    let argv = split("a \"b\\").unwrap();
    assert_eq!(argv.error, Some(TokenizerError::DanglingEscape));
    assert_eq!(argv.words(), vec!["a", "b\\"]);
    assert!(split("a b").unwrap().error.is_none());
}

#[test]
fn deep_nesting_rejected() {
    let source = format!("{}x{}", "$(".repeat(100), ")".repeat(100));
    assert_eq!(
        split(&source),
        Err(TokenizerError::DepthExceeded { limit: 64 })
    );
}

#[test]
fn duplicate_definition_rejected() {
    let mut tokenizer = Tokenizer::from_config(&Config::default_config()).unwrap();
    assert!(matches!(
        tokenizer.define(Definition::new("$(", ")").inherit("").depend("")),
        Err(TokenizerError::DuplicateRule { .. })
    ));
    assert!(matches!(
        tokenizer.define(Definition::new("$(", "]").depend("x")),
        Err(TokenizerError::ContextConflict { .. })
    ));
}

// ── Feature toggles ──

#[test]
fn interpolation_disabled() {
    let tokenizer = with_features(Features {
        interpolation: false,
        ..Features::default()
    });
    let argv = tokenizer.parse("a$(b c)").unwrap();
    assert_eq!(argv.words(), vec!["a$(b", "c)"]);
}

#[test]
fn backslash_disabled() {
    let tokenizer = with_features(Features {
        backslash_escapes: false,
        ..Features::default()
    });
    assert_eq!(tokenizer.parse("a\\ b").unwrap().words(), vec!["a\\", "b"]);
    // ANSI-C strings keep their own escapes
    assert_eq!(tokenizer.parse("$'\\t'").unwrap().words(), vec!["\t"]);
}

#[test]
fn ansi_c_disabled() {
    let tokenizer = with_features(Features {
        ansi_c_quoting: false,
        ..Features::default()
    });
    // `$` is literal and `'\t'` is an ordinary single-quoted string
    assert_eq!(tokenizer.parse("$'\\t'").unwrap().words(), vec!["$\\t"]);
}

// ── Custom contexts ──

#[test]
fn custom_context_with_inheritance() {
    let mut tokenizer = Tokenizer::from_config(&Config::default_config()).unwrap();
    tokenizer
        .define(Definition::new("`", "`").inherit("").quoted(false).depend(""))
        .unwrap();
    let argv = tokenizer.parse("a`b 'c d'`e").unwrap();
    assert_eq!(argv.words(), vec!["ae"]);
    let inter = &argv.tokens[0].inters[0];
    assert_eq!(inter.initiator, "`");
    assert_eq!(inter.argv.words(), vec!["b", "c d"]);
}

#[test]
fn custom_terminator_and_delimiter() {
    let tokenizer = Tokenizer::from_config(&Config::default_config()).unwrap();
    let options = argv_tokenizer::parse::ParseOptions::new()
        .terminator(";")
        .delimiter(Pattern::Whitespace);
    let argv = tokenizer.parse_with("ls -la; rm x", &options).unwrap();
    assert_eq!(argv.words(), vec!["ls", "-la"]);
    assert_eq!(argv.rest, " rm x");
}

// ── Convenience API ──

#[test]
fn tokenize_returns_words() {
    assert_eq!(
        tokenize("git commit -m 'a message'").unwrap(),
        vec!["git", "commit", "-m", "a message"]
    );
}

#[test]
fn tokenize_rejects_deep_nesting() {
    let source = format!("{}x{}", "$(".repeat(100), ")".repeat(100));
    assert_eq!(
        tokenize(&source),
        Err(TokenizerError::DepthExceeded { limit: 64 })
    );
}

#[test]
fn performance_many_parses() {
    for _ in 0..10_000 {
        split("command arg1 arg2 arg3 arg4 arg5 arg6 arg7 arg8 arg9 arg10").unwrap();
    }
}
