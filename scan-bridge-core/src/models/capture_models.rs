use serde::{Deserialize, Serialize};

/// Barcode encodings the metadata output can be asked to recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Symbology {
    Ean13,
    Qr,
    DataMatrix,
}

/// Camera authorization as reported by the platform.
///
/// Platform "restricted" states are reported as `Denied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CameraPermission {
    Denied,
    NotDetermined,
    Allowed,
}

impl CameraPermission {
    /// Only an explicit denial blocks capture; an undetermined state proceeds
    /// and lets the platform prompt on first use.
    pub fn permits_capture(&self) -> bool {
        !matches!(self, Self::Denied)
    }
}

/// One machine-readable object recognized in a captured frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataObject {
    pub symbology: Symbology,
    pub string_value: Option<String>,
}

impl MetadataObject {
    pub fn new(symbology: Symbology, value: impl Into<String>) -> Self {
        Self {
            symbology,
            string_value: Some(value.into()),
        }
    }

    /// An object the platform recognized but could not decode to text.
    pub fn undecoded(symbology: Symbology) -> Self {
        Self {
            symbology,
            string_value: None,
        }
    }
}

/// Counters for debugging scan sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanDiagnostics {
    /// Metadata callbacks received while running.
    pub ticks_received: u64,
    /// Objects skipped because of a rejected symbology, a missing value,
    /// or because an earlier object in the same tick already won.
    pub objects_ignored: u64,
    /// Ticks that updated the last observed code.
    pub codes_observed: u64,
}
