use super::error::ScanError;
use super::payload::DecodedPayload;

/// Terminal outcome of a scan session, delivered exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    Recognized(DecodedPayload),
    NoCode,
    PermissionDenied,
    CaptureFailed(ScanError),
}

impl ScanResult {
    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized(_))
    }

    pub fn payload(&self) -> Option<&DecodedPayload> {
        match self {
            Self::Recognized(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Recognized(_) => "recognized",
            Self::NoCode => "no-code",
            Self::PermissionDenied => "permission-denied",
            Self::CaptureFailed(_) => "capture-failed",
        }
    }
}
