use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::parser::payload_parser;

/// Structured fields extracted from a scanned GS1-style payload.
///
/// Fields that could not be located are empty strings, never absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedPayload {
    pub id: String,
    pub batch: String,
    pub expiry_date_raw: String,
}

impl DecodedPayload {
    /// The expiry as a calendar date, if `expiry_date_raw` is a valid `yyyyMMdd`.
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        payload_parser::parse_expiry(&self.expiry_date_raw)
    }

    /// The expiry formatted as `dd/MM/yyyy`, or an empty string.
    pub fn expiry_display(&self) -> String {
        payload_parser::format_expiry(&self.expiry_date_raw).unwrap_or_default()
    }

    /// True when any field is empty, which is how an unexpected AI order
    /// or a truncated code surfaces.
    pub fn is_partial(&self) -> bool {
        self.id.is_empty() || self.batch.is_empty() || self.expiry_date_raw.is_empty()
    }
}
