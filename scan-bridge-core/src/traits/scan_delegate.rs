use crate::models::scan_result::ScanResult;
use crate::models::state::SessionStatus;

/// Event listener for scan session notifications.
///
/// Methods are called without any session lock held, on whatever context
/// drove the event (the capture delivery context for `on_code_observed`).
/// Calling `ScanSession::stop` from inside any of them is allowed.
pub trait ScanDelegate: Send + Sync {
    /// Called after every lifecycle transition.
    fn on_status_changed(&self, status: SessionStatus);

    /// Live-preview side channel: the code just decoded. Not a final result.
    fn on_code_observed(&self, raw_code: &str);

    /// Called exactly once per session with its terminal outcome.
    fn on_session_ended(&self, result: &ScanResult);
}
