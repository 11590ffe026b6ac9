//! Display formatting for amounts, phone numbers and timestamps.
//!
//! Every formatter is total: input it cannot interpret is returned as-is
//! so a table cell never renders empty because of one odd record.

use chrono::DateTime;

/// Format an amount given in minor units (1/100) with grouped thousands.
///
/// `format_money(123456789, "UZS")` → `"1 234 567.89 UZS"`.
pub fn format_money(minor_units: i64, currency: &str) -> String {
    let negative = minor_units < 0;
    let abs = minor_units.unsigned_abs();
    let whole = group_thousands(abs / 100);
    let cents = abs % 100;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&whole);
    out.push_str(&format!(".{:02}", cents));
    if !currency.is_empty() {
        out.push(' ');
        out.push_str(currency);
    }
    out
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Format a Uzbek mobile number: `998901234567` → `+998 90 123 45 67`.
///
/// Non-digit characters are ignored. Anything that is not a 12-digit
/// `998…` number (or its 9-digit local form) is returned unchanged.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let local = match digits.len() {
        12 if digits.starts_with("998") => &digits[3..],
        9 => digits.as_str(),
        _ => return raw.to_string(),
    };
    format!(
        "+998 {} {} {} {}",
        &local[0..2],
        &local[2..5],
        &local[5..7],
        &local[7..9]
    )
}

/// RFC 3339 timestamp → `dd.mm.yyyy`.
pub fn format_date(rfc3339: &str) -> String {
    match DateTime::parse_from_rfc3339(rfc3339) {
        Ok(dt) => dt.format("%d.%m.%Y").to_string(),
        Err(_) => rfc3339.to_string(),
    }
}

/// RFC 3339 timestamp → `dd.mm.yyyy HH:MM` (in the timestamp's own offset).
pub fn format_datetime(rfc3339: &str) -> String {
    match DateTime::parse_from_rfc3339(rfc3339) {
        Ok(dt) => dt.format("%d.%m.%Y %H:%M").to_string(),
        Err(_) => rfc3339.to_string(),
    }
}

/// Truncate to at most `max` characters, appending `…` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
