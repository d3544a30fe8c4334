//! Shared formatting for user-facing messages and logging setup.

use tracing::Level;

/// Normalize an error message to a single trimmed line.
///
/// Messages end up inside JSON bodies and log lines, so embedded newlines and
/// runs of whitespace are collapsed.
pub fn error_message(msg: impl Into<String>) -> String {
    let msg = msg.into();
    msg.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map `-v` occurrences (and `--quiet`) to a log level.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global fmt subscriber. Logs go to stderr; stdout carries the
/// JSON response bodies.
pub fn init_logging(verbose: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            error_message("  duplicate operation\n type:\tAUTHENTICATE "),
            "duplicate operation type: AUTHENTICATE"
        );
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0, false), Level::WARN);
        assert_eq!(level_for(2, false), Level::DEBUG);
        assert_eq!(level_for(9, false), Level::TRACE);
        assert_eq!(level_for(3, true), Level::ERROR);
    }
}
