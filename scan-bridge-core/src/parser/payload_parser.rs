//! Decomposition of bracketed GS1-style payloads.
//!
//! The parser is positional: it assumes the identifiers appear in the order
//! `(01) id (17) expiry (10) batch`. Any other order, or extra AIs, yields
//! shifted or empty fields rather than an error.
//!
//! ```text
//! "(01)04012345678901(17)20250131(10)AB12"
//!   → id = "04012345678901", expiry_date_raw = "20250131", batch = "AB12"
//! ```

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::payload::DecodedPayload;

/// Product identifier AI.
pub const AI_PRODUCT_ID: &str = "(01)";
/// Expiry date AI.
pub const AI_EXPIRY: &str = "(17)";
/// Batch/lot AI.
pub const AI_BATCH: &str = "(10)";

/// Display format for expiry dates.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

const FIELD_SEPARATOR: char = ' ';

/// Split a raw scanned string into `(id, batch, expiry)`.
///
/// Never fails. Missing positions become empty strings.
pub fn parse(raw: &str) -> DecodedPayload {
    let normalized = raw
        .replace(AI_PRODUCT_ID, "")
        .replace(AI_EXPIRY, " ")
        .replace(AI_BATCH, " ");

    let mut fields = normalized.split(FIELD_SEPARATOR);
    let id = fields.next().unwrap_or_default().to_string();
    let expiry_date_raw = fields.next().unwrap_or_default().to_string();
    let batch = fields.next().unwrap_or_default().to_string();

    if id.is_empty() || expiry_date_raw.is_empty() || batch.is_empty() {
        log::debug!("payload parsed with missing fields ({} bytes)", raw.len());
    }

    DecodedPayload {
        id,
        batch,
        expiry_date_raw,
    }
}

/// Interpret `raw` as a `yyyyMMdd` calendar date.
///
/// Exactly eight ASCII digits forming a real date are required.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = raw[0..4].parse().ok()?;
    let month: u32 = raw[4..6].parse().ok()?;
    let day: u32 = raw[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Reformat a `yyyyMMdd` expiry as `dd/MM/yyyy`.
pub fn format_expiry(raw: &str) -> Option<String> {
    format_expiry_with(raw, DISPLAY_FORMAT)
}

/// Reformat a `yyyyMMdd` expiry with a chrono format string.
///
/// Returns `None` for an invalid date or an invalid format string.
pub fn format_expiry_with(raw: &str, format: &str) -> Option<String> {
    let date = parse_expiry(raw)?;
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

/// Whether `format` renders a date without error.
pub fn is_valid_display_format(format: &str) -> bool {
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN);
    let mut out = String::new();
    !format.trim().is_empty() && write!(out, "{}", sample.format(format)).is_ok()
}
