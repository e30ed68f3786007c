//! Delivery of scan results into the hosted page.

use std::sync::Arc;

use scan_bridge_core::parser::payload_parser;
use scan_bridge_core::DecodedPayload;

/// Web view hosting the page. Both operations are fire-and-forget sinks.
pub trait WebHost: Send {
    /// Run `script` in the page context.
    fn evaluate_script(&mut self, script: &str);

    /// Show a native alert over the page.
    fn present_alert(&mut self, title: &str, message: &str);
}

/// Receives every decoded code while a session runs, for in-overlay display.
pub type PreviewSink = Arc<dyn Fn(&str) + Send + Sync + 'static>;

/// Build the `function("id", "batch", "expiry");` call for a payload.
///
/// Arguments are emitted as JSON string literals so scanned text cannot
/// escape the call. The expiry is empty when it is not a valid date.
pub fn update_script(function: &str, payload: &DecodedPayload, expiry_format: &str) -> String {
    let expiry =
        payload_parser::format_expiry_with(&payload.expiry_date_raw, expiry_format).unwrap_or_default();
    format!(
        "{}({}, {}, {});",
        function,
        script_string(&payload.id),
        script_string(&payload.batch),
        script_string(&expiry)
    )
}

/// Quote `value` as a JavaScript string literal.
pub fn script_string(value: &str) -> String {
    let quoted = serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string());
    // Valid in JSON but line terminators in pre-ES2019 script.
    quoted.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029")
}

/// A plain or dotted identifier such as `updateFromNative` or `window.app.onScan`.
pub fn is_script_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(id: &str, batch: &str, expiry: &str) -> DecodedPayload {
        DecodedPayload {
            id: id.into(),
            batch: batch.into(),
            expiry_date_raw: expiry.into(),
        }
    }

    #[test]
    fn builds_update_call() {
        let script = update_script("updateFromNative", &payload("123", "B9", "20250131"), "%d/%m/%Y");
        assert_eq!(script, r#"updateFromNative("123", "B9", "31/01/2025");"#);
    }

    #[test]
    fn invalid_expiry_becomes_empty() {
        let script = update_script("updateFromNative", &payload("123", "", "2025-13-99"), "%d/%m/%Y");
        assert_eq!(script, r#"updateFromNative("123", "", "");"#);
    }

    #[test]
    fn hostile_text_stays_quoted() {
        let script = update_script("f", &payload(r#"");alert(1);//"#, "a\\b\nc", ""), "%d/%m/%Y");
        assert_eq!(script, r#"f("\");alert(1);//", "a\\b\nc", "");"#);
    }

    #[test]
    fn escapes_line_separators() {
        assert_eq!(script_string("a\u{2028}b"), r#""a\u2028b""#);
    }

    #[test]
    fn identifiers() {
        assert!(is_script_identifier("updateFromNative"));
        assert!(is_script_identifier("window.app.$onScan_2"));
        assert!(!is_script_identifier(""));
        assert!(!is_script_identifier("2fast"));
        assert!(!is_script_identifier("a..b"));
        assert!(!is_script_identifier("f()"));
    }
}
