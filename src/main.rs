//! argv-tokenizer: split a command line read from stdin.
//!
//! Prints the token tree as JSON, or with
//!   --words        one logical word per line
//!   --stringify    the reconstructed source text
//!   --dump-config  the effective configuration
//!   --verbose      debug logging on stderr

use std::io::Read;

use argv_tokenizer::config::Config;
use argv_tokenizer::logging;
use argv_tokenizer::parse::{Tokenizer, stringify};

const FLAGS: &[&str] = &["--words", "--stringify", "--dump-config", "--verbose"];

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(unknown) = args.iter().find(|a| !FLAGS.contains(&a.as_str())) {
        eprintln!("argv-tokenizer: unknown argument: {unknown}");
        std::process::exit(2);
    }
    let has = |flag: &str| args.iter().any(|a| a == flag);

    logging::init(has("--verbose"));
    let config = Config::load();

    if has("--dump-config") {
        match toml::to_string_pretty(&config) {
            Ok(s) => print!("{s}"),
            Err(e) => {
                eprintln!("argv-tokenizer: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        eprintln!("failed to read stdin");
        std::process::exit(1);
    }
    let source = input
        .strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(&input);

    let tokenizer = match Tokenizer::from_config(&config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("argv-tokenizer: {e}");
            std::process::exit(1);
        }
    };
    let argv = match tokenizer.parse(source) {
        Ok(argv) => argv,
        Err(e) => {
            eprintln!("argv-tokenizer: {e}");
            std::process::exit(1);
        }
    };

    logging::log_parse(source, &argv);
    if let Some(e) = &argv.error {
        log::warn!("{e}");
    }

    if has("--stringify") {
        println!("{}", stringify(&argv));
    } else if has("--words") {
        for word in argv.words() {
            println!("{word}");
        }
    } else {
        match serde_json::to_string_pretty(&argv) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("argv-tokenizer: {e}");
                std::process::exit(1);
            }
        }
    }
}
