mod pretty_list;

use std::{fmt::Write as FmtWrite, sync::OnceLock};

use anyhow::Result;
use flexi_logger::{DeferredNow, Logger, LoggerHandle, Record};
use regex::Regex;
use textwrap::{termwidth, Options};

pub use self::pretty_list::PrettyList;

/// Matches the final continuation line of a wrapped log entry.
static LAST_LINE_MATCHER: OnceLock<Regex> = OnceLock::new();

fn last_line_matcher() -> &'static Regex {
    LAST_LINE_MATCHER.get_or_init(|| {
        Regex::new(r"┃(.*)$").expect("the last-line pattern is valid")
    })
}

/// Setup console logging for this application.
///
/// The returned handle must be kept alive for as long as the application
/// wants to log.
pub fn setup() -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str("info")?
        .format(multiline_format)
        .start()?;

    log::info!(
        "Adjust the log level by setting RUST_LOG. By default RUST_LOG=info"
    );

    Ok(handle)
}

/// An opinionated formatting function for flexi_logger which automatically
/// wraps content to the terminal width.
///
/// Entries begin with `┏`, continue with `┃`, and the last line of a multiline
/// entry starts with `┗` so it's easy to tell where a big log statement
/// begins and ends.
pub fn multiline_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let header = format!(
        "{} [{}] [{}:{}]",
        record.level(),
        now.format("%H:%M:%S%.6f"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
    );
    writeln!(w, "{}", wrap_entry(&header, record.args()))
}

fn wrap_entry(header: &str, message: impl std::fmt::Display) -> String {
    let size = termwidth().min(74);
    let wrap_options = Options::new(size)
        .initial_indent("┏ ")
        .subsequent_indent("┃ ");

    let mut full_line = String::new();
    let _ = writeln!(full_line, "{}", header);
    let _ = write!(full_line, "{}", message);

    let wrapped = textwrap::fill(&full_line, wrap_options);
    last_line_matcher().replace(&wrapped, "┗$1").into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn entries_are_framed() {
        let entry = wrap_entry("INFO [00:00:00] [main.rs:1]", "hello");
        let lines: Vec<&str> = entry.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("┏ INFO"));
        assert_eq!(lines[1], "┗ hello");
    }

    #[test]
    fn long_entries_are_wrapped() {
        let message = "word ".repeat(100);
        let entry = wrap_entry("INFO", message.trim());
        let lines: Vec<&str> = entry.lines().collect();
        assert!(lines.len() > 3);
        assert!(lines[1].starts_with("┃ "));
        assert!(lines.last().unwrap().starts_with("┗ "));
    }
}
