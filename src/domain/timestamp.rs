use crate::error::{IpnError, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

const HOUR: i32 = 3600;

/// Layouts tried after the time zone has been split off, most specific first.
const LOCAL_FORMATS: &[&str] = &[
    // Processor layout: "20:12:59 Jan 13, 2009"
    "%H:%M:%S %b %d, %Y",
    "%H:%M:%S %b %d %Y",
    "%b %d, %Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses a `payment_date` value into a zoned timestamp.
///
/// The processor sends `HH:MM:SS Mon DD, YYYY TZ` with a North American zone
/// abbreviation. RFC 3339 and RFC 2822 strings are accepted too, as is a bare
/// local layout with no zone, which is read as UTC.
pub fn parse_payment_date(value: &str) -> Result<DateTime<FixedOffset>> {
    let invalid = || IpnError::InvalidTimestamp {
        value: value.to_string(),
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(parsed);
    }

    let (local, offset) = split_zone(trimmed).ok_or_else(invalid)?;
    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())
        .ok_or_else(invalid)?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(invalid)
}

/// Splits a trailing zone token off `value`. Returns `None` for a token that
/// looks like a zone but isn't one we know.
fn split_zone(value: &str) -> Option<(&str, FixedOffset)> {
    let Some((head, token)) = value.rsplit_once(char::is_whitespace) else {
        return Some((value, utc()));
    };

    if let Some(offset) = zone_abbreviation(token) {
        return Some((head.trim_end(), offset));
    }
    if let Some(offset) = numeric_offset(token) {
        return Some((head.trim_end(), offset));
    }
    if token.len() >= 3 && token.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    Some((value, utc()))
}

fn zone_abbreviation(token: &str) -> Option<FixedOffset> {
    let hours = match token {
        "UTC" | "GMT" | "Z" => 0,
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        _ => return None,
    };
    FixedOffset::east_opt(hours * HOUR)
}

/// `+hhmm` / `-hhmm` / `+hh:mm`.
fn numeric_offset(token: &str) -> Option<FixedOffset> {
    let (sign, digits) = match token.as_bytes().first()? {
        b'+' => (1, &token[1..]),
        b'-' => (-1, &token[1..]),
        _ => return None,
    };
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * HOUR + minutes * 60))
}

fn utc() -> FixedOffset {
    Utc.fix()
}
