//! ANSI color codes and terminal capability detection

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const BLACK: &'static str = "\x1b[30m";
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const MAGENTA: &'static str = "\x1b[35m";
    pub const CYAN: &'static str = "\x1b[36m";

    pub const BRIGHT_WHITE: &'static str = "\x1b[97m";
    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
}

/// Apply color to text if the terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{color}{text}{}", Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Whether stdout should receive ANSI escapes.
///
/// `NO_COLOR` and `FORCE_COLOR=0` disable, any other `FORCE_COLOR` enables,
/// otherwise stdout must be a terminal that is not `dumb`.
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }
    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    if cfg!(test) {
        return false;
    }
    if !std::io::stdout().is_terminal() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb") | Ok(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_without_terminal_is_plain() {
        // NO_COLOR may or may not be set; neither case colors under cfg(test)
        if std::env::var("FORCE_COLOR").is_err() {
            assert_eq!(colorize("PASS", Colors::GREEN), "PASS");
        }
    }

    #[test]
    fn test_color_constants_are_escapes() {
        for code in [
            Colors::RESET,
            Colors::BOLD,
            Colors::RED,
            Colors::GREEN,
            Colors::BRIGHT_YELLOW,
        ] {
            assert!(code.starts_with("\x1b["));
            assert!(code.ends_with('m'));
        }
    }
}
