//! Display formatting for money, dates and identifiers.
//!
//! All three functions are total: they never fail, whatever the input.

use chrono::NaiveDateTime;

/// Default number of characters kept by [`short_id`].
pub const DEFAULT_SHORT_ID_LENGTH: usize = 8;

const INPUT_DATE_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";
const OUTPUT_DATE_PATTERN: &str = "%b %d, %Y";

/// Format minor units as `$#,##0.00` (1234 → `$12.34`).
///
/// Integer arithmetic only; negative amounts get a leading `-`.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", group_thousands(abs / 100), abs % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format `2022-10-01T10:22:32` as `Oct 01, 2022`.
///
/// Only the leading timestamp is parsed; trailing text such as fractional
/// seconds or a zone suffix (`.000Z`) is ignored. Fail-soft: input without a
/// parseable prefix is returned unchanged.
pub fn format_invoice_date(date: &str) -> String {
    match NaiveDateTime::parse_and_remainder(date, INPUT_DATE_PATTERN) {
        Ok((parsed, _)) => parsed.format(OUTPUT_DATE_PATTERN).to_string(),
        Err(err) => {
            tracing::warn!(date, error = %err, "failed to parse invoice date");
            date.to_string()
        }
    }
}

/// First [`DEFAULT_SHORT_ID_LENGTH`] characters of `id`.
pub fn short_id(id: &str) -> String {
    short_id_with_len(id, DEFAULT_SHORT_ID_LENGTH)
}

/// First `len` characters of `id`; shorter ids pass through unchanged.
pub fn short_id_with_len(id: &str, len: usize) -> String {
    id.chars().take(len).collect()
}
