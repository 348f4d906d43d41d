//! Console logging for simprint: prefixed lines on stderr, debug for this crate when verbose.

use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::fmt::Display;
use std::io::Write;

/// Level for simprint's own modules. Dependencies stay at warnings.
pub fn crate_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// One log line. Warnings and errors also name the module they came from.
pub fn render_line(level: Level, target: &str, message: impl Display) -> String {
    let name = env!("CARGO_PKG_NAME").cyan();
    let tag = match level {
        Level::Error => "ERROR".red(),
        Level::Warn => "WARN".yellow(),
        _ => return format!("[{name}] {message}"),
    };
    format!("[{name} {tag} {}] {message}", target.white())
}

pub fn setup_logging(verbose: bool) {
    // try_init: library callers and tests may have installed a logger already.
    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), crate_level(verbose))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}",
                render_line(record.level(), record.target(), record.args())
            )
        })
        .try_init();
}
