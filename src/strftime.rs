//! strftime-style rendering of timestamps.
//!
//! The file sink resolves its rotating path through [`format`], so a template such as
//! `/var/log/app-%Y%m%d.log` switches files once a day. The verb table is fixed and
//! locale independent: weekday and month names are always English, and each numeric
//! verb has its own padding.
//!
//! Unknown verbs are dropped together with their `%`, and so is a `%` ending the
//! template. Nothing here fails.

use std::fmt::Write;

use time::OffsetDateTime;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTHS: [&str; 12] = [
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

/// Render `template` for `instant`.
pub fn format(template: &str, instant: &OffsetDateTime) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if let Some(verb) = chars.next() {
            push_verb(&mut out, verb, instant);
        }
    }

    out
}

/// Full weekday name of `instant`.
fn weekday_name(instant: &OffsetDateTime) -> &'static str {
    WEEKDAYS[instant.weekday().number_days_from_monday() as usize]
}

/// Full month name of `instant`.
fn month_name(instant: &OffsetDateTime) -> &'static str {
    MONTHS[u8::from(instant.month()) as usize - 1]
}

fn hour12(hour: u8) -> u8 {
    if hour == 0 || hour == 12 { 12 } else { hour % 12 }
}

fn meridiem(hour: u8) -> &'static str {
    if hour < 12 { "AM" } else { "PM" }
}

// Writing into a String cannot fail, so the fmt results are discarded.
fn push_verb(out: &mut String, verb: char, t: &OffsetDateTime) {
    let month = u8::from(t.month());
    let year = t.year();

    match verb {
        'a' => out.push_str(&weekday_name(t)[..3]),
        'A' => out.push_str(weekday_name(t)),
        'b' | 'h' => out.push_str(&month_name(t)[..3]),
        'B' => out.push_str(month_name(t)),
        'c' => {
            let _ = write!(
                out,
                "{} {} {} {:02}:{:02}:{:02} {}",
                &weekday_name(t)[..3],
                &month_name(t)[..3],
                t.day(),
                t.hour(),
                t.minute(),
                t.second(),
                year
            );
        }
        'C' => {
            let _ = write!(out, "{:02}", year / 100);
        }
        'd' => {
            let _ = write!(out, "{:02}", t.day());
        }
        'D' | 'x' => {
            let _ = write!(out, "{:02}/{:02}/{:02}", month, t.day(), year % 100);
        }
        'e' => {
            let _ = write!(out, "{:2}", t.day());
        }
        'f' => {
            let _ = write!(out, "{:06}", t.microsecond());
        }
        'F' => {
            let _ = write!(out, "{:04}-{:02}-{:02}", year, month, t.day());
        }
        'g' => {
            let (iso_year, _, _) = t.to_iso_week_date();
            let _ = write!(out, "{:02}", iso_year % 100);
        }
        'G' => {
            let (iso_year, _, _) = t.to_iso_week_date();
            let _ = write!(out, "{:04}", iso_year);
        }
        'H' => {
            let _ = write!(out, "{:02}", t.hour());
        }
        'I' => {
            let _ = write!(out, "{:02}", hour12(t.hour()));
        }
        'j' => {
            let _ = write!(out, "{:03}", t.ordinal());
        }
        'k' => {
            let _ = write!(out, "{:2}", t.hour());
        }
        'l' => {
            let _ = write!(out, "{:2}", hour12(t.hour()));
        }
        'm' => {
            let _ = write!(out, "{:02}", month);
        }
        'M' => {
            let _ = write!(out, "{:02}", t.minute());
        }
        'n' => out.push('\n'),
        'p' => out.push_str(meridiem(t.hour())),
        'P' => out.push_str(&meridiem(t.hour()).to_ascii_lowercase()),
        'r' => {
            let _ = write!(
                out,
                "{:02}:{:02}:{:02} {}",
                hour12(t.hour()),
                t.minute(),
                t.second(),
                meridiem(t.hour())
            );
        }
        'R' => {
            let _ = write!(out, "{:02}:{:02}", t.hour(), t.minute());
        }
        's' => {
            let _ = write!(out, "{}", t.unix_timestamp());
        }
        'S' => {
            let _ = write!(out, "{:02}", t.second());
        }
        't' => out.push('\t'),
        'T' | 'X' => {
            let _ = write!(out, "{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second());
        }
        'u' => {
            let _ = write!(out, "{}", t.weekday().number_from_monday());
        }
        'U' => {
            let sunday_based = t.weekday().number_days_from_sunday() as i32;
            let _ = write!(out, "{}", (t.ordinal() as i32 + 6 - sunday_based) / 7);
        }
        'V' => {
            let (_, week, _) = t.to_iso_week_date();
            let _ = write!(out, "{:02}", week);
        }
        'w' => {
            let _ = write!(out, "{}", t.weekday().number_days_from_sunday());
        }
        'W' => {
            let monday_based = t.weekday().number_days_from_monday() as i32;
            let _ = write!(out, "{}", (t.ordinal() as i32 + 6 - monday_based) / 7);
        }
        'y' => {
            let _ = write!(out, "{:02}", year % 100);
        }
        'Y' => {
            let _ = write!(out, "{:04}", year);
        }
        'z' => push_offset(out, t),
        'Z' => {
            if t.offset().is_utc() {
                out.push_str("UTC");
            } else {
                push_offset(out, t);
            }
        }
        '%' => out.push('%'),
        _ => {}
    }
}

fn push_offset(out: &mut String, t: &OffsetDateTime) {
    let seconds = t.offset().whole_seconds();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    let _ = write!(out, "{}{:02}{:02}", sign, minutes / 60, minutes % 60);
}
