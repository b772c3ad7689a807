/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Signed in → green, late → yellow, absent → red.
pub fn color_for_presence(is_signed_in: bool, is_late: bool) -> &'static str {
    match (is_signed_in, is_late) {
        (true, false) => GREEN,
        (true, true) => YELLOW,
        (false, _) => RED,
    }
}

/// Temporary (redistributed) rows stand out from scheduled ones.
pub fn color_for_ledger_row(is_active: bool, is_temporary: bool) -> &'static str {
    match (is_active, is_temporary) {
        (false, _) => GREY,
        (true, true) => MAGENTA,
        (true, false) => RESET,
    }
}

/// Grey out empty cells ("", "-", "0").
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "-" || v == "0" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
