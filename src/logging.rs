use std::fs::{self, OpenOptions};
use std::path::Path;

use log::{LevelFilter, info};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use crate::parse::Argv;

/// Directory holding `tokenizer.log`.
const LOG_DIR: &str = "~/.local/share/argv-tokenizer";

/// Install the global logger: stderr (warnings, or debug output when
/// `verbose`) plus an append-only file under ~/.local/share/argv-tokenizer.
/// Best-effort: a missing home directory or unwritable file only drops the
/// file sink.
pub fn init(verbose: bool) {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        term_level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    let log_dir = shellexpand::tilde(LOG_DIR);
    let log_dir = Path::new(log_dir.as_ref());
    let _ = fs::create_dir_all(log_dir);
    if let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("tokenizer.log"))
    {
        loggers.push(WriteLogger::new(LevelFilter::Info, config, file));
    }

    // A logger may already be installed (tests, embedding hosts).
    let _ = CombinedLogger::init(loggers);
}

/// Record one parse: token count, interpolation count, error, and the
/// source truncated to 200 characters.
pub fn log_parse(source: &str, argv: &Argv) {
    let source_oneline = source.replace('\n', "; ");
    let source_truncated: String = source_oneline.chars().take(200).collect();
    let inters: usize = argv.tokens.iter().map(|t| t.inters.len()).sum();
    let error = argv
        .error
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);

    info!(
        "{tokens}\t{inters}\t{error}\t{source}",
        tokens = argv.tokens.len(),
        source = source_truncated,
    );
}
