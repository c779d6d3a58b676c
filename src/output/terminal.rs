//! ANSI colors for the stderr diagnostic block

pub mod colors {
    pub const GREY: u8 = 102;      // #7D7D7D - Separator, secondary
    pub const AQUA: u8 = 109;      // #7A9EB5 - 1xx
    pub const ORANGE: u8 = 208;    // #F2913D - Warnings, PUT/PATCH, 4xx
    pub const RED: u8 = 167;       // #E34F45 - Errors, DELETE, 5xx
    pub const BLUE: u8 = 68;       // #426BD1 - Header names
    pub const GREEN: u8 = 71;      // #63C27A - GET, 2xx
    pub const YELLOW: u8 = 185;    // #CCCC3D - POST, 3xx
}

pub const RESET: &str = "\x1b[0m";

#[inline]
pub fn fg(color: u8) -> String {
    format!("\x1b[38;5;{}m", color)
}

#[inline]
pub fn bold_fg(color: u8) -> String {
    format!("\x1b[1;38;5;{}m", color)
}

#[inline]
pub fn colorize(text: &str, color: u8) -> String {
    format!("{}{}{}", fg(color), text, RESET)
}

#[inline]
pub fn bold(text: &str, color: u8) -> String {
    format!("{}{}{}", bold_fg(color), text, RESET)
}

/// Warning message (orange)
#[inline]
pub fn warning(text: &str) -> String {
    bold(text, colors::ORANGE)
}

/// Header name (blue)
#[inline]
pub fn label(text: &str) -> String {
    colorize(text, colors::BLUE)
}

/// Secondary/muted text (grey)
#[inline]
pub fn muted(text: &str) -> String {
    colorize(text, colors::GREY)
}

/// HTTP status line, colored by status class
pub fn http_status(code: u16, text: &str) -> String {
    let color = match code / 100 {
        1 => colors::AQUA,
        2 => colors::GREEN,
        3 => colors::YELLOW,
        4 => colors::ORANGE,
        5 => colors::RED,
        _ => colors::GREY,
    };
    bold(text, color)
}

/// HTTP method, colored by verb
pub fn http_method(method: &str) -> String {
    let color = match method {
        "GET" | "HEAD" | "OPTIONS" => colors::GREEN,
        "POST" => colors::YELLOW,
        "PUT" | "PATCH" => colors::ORANGE,
        "DELETE" => colors::RED,
        _ => colors::GREY,
    };
    bold(method, color)
}
