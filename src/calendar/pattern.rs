//! Moment-style date patterns (`YYYY/MM/DD - dddd`)
//!
//! Note names in a vault are configured with the token set users already know
//! from their editors. Tokens are matched longest first; text inside `[...]` is
//! copied verbatim, and any other character is a literal.

use chrono::{Datelike, Timelike};

/// Recognized tokens, longest first within each family.
const TOKENS: &[&str] = &[
    "YYYY", "YY", "Q", "MMMM", "MMM", "MM", "M", "DDDD", "DDD", "Do", "DD", "D", "dddd", "ddd",
    "dd", "d", "E", "WW", "W", "HH", "H", "hh", "h", "mm", "m", "ss", "s", "A", "a",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Render `at` using a moment-style pattern.
pub fn render<T: Datelike + Timelike>(pattern: &str, at: &T) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            out.push_str(&render_token(token, at));
            rest = &rest[token.len()..];
            continue;
        }

        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

/// True when the pattern contains at least one date or time token.
pub fn has_tokens(pattern: &str) -> bool {
    let mut rest = pattern;
    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            if let Some(end) = rest.find(']') {
                rest = &rest[end + 1..];
                continue;
            }
        }
        if TOKENS.iter().any(|token| rest.starts_with(*token)) {
            return true;
        }
        rest = &rest[ch.len_utf8()..];
    }
    false
}

fn render_token<T: Datelike + Timelike>(token: &str, at: &T) -> String {
    let month0 = at.month0() as usize;
    let weekday = at.weekday().num_days_from_sunday() as usize;
    match token {
        "YYYY" => format!("{:04}", at.year()),
        "YY" => format!("{:02}", at.year().rem_euclid(100)),
        "Q" => (month0 / 3 + 1).to_string(),
        "MMMM" => MONTH_NAMES[month0].to_string(),
        "MMM" => MONTH_NAMES[month0][..3].to_string(),
        "MM" => format!("{:02}", at.month()),
        "M" => at.month().to_string(),
        "DDDD" => format!("{:03}", at.ordinal()),
        "DDD" => at.ordinal().to_string(),
        "Do" => ordinal_suffixed(at.day()),
        "DD" => format!("{:02}", at.day()),
        "D" => at.day().to_string(),
        "dddd" => WEEKDAY_NAMES[weekday].to_string(),
        "ddd" => WEEKDAY_NAMES[weekday][..3].to_string(),
        "dd" => WEEKDAY_NAMES[weekday][..2].to_string(),
        "d" => weekday.to_string(),
        "E" => at.weekday().number_from_monday().to_string(),
        "WW" => format!("{:02}", at.iso_week().week()),
        "W" => at.iso_week().week().to_string(),
        "HH" => format!("{:02}", at.hour()),
        "H" => at.hour().to_string(),
        "hh" => format!("{:02}", at.hour12().1),
        "h" => at.hour12().1.to_string(),
        "mm" => format!("{:02}", at.minute()),
        "m" => at.minute().to_string(),
        "ss" => format!("{:02}", at.second()),
        "s" => at.second().to_string(),
        "A" => if at.hour12().0 { "PM" } else { "AM" }.to_string(),
        "a" => if at.hour12().0 { "pm" } else { "am" }.to_string(),
        other => other.to_string(),
    }
}

fn ordinal_suffixed(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}
