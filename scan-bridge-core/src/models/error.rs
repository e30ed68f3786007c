use thiserror::Error;

/// Errors raised by scan collaborators and the session lifecycle.
///
/// Collaborator failures never cross the listener boundary as errors: the
/// session folds them into a single `ScanResult`. Only caller misuse
/// (`InvalidState`) is returned directly from session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("capture device not available")]
    DeviceNotAvailable,

    #[error("failed to attach capture input: {0}")]
    InputAttachFailed(String),

    #[error("failed to configure metadata output: {0}")]
    OutputConfigurationFailed(String),

    #[error("capture stream failed: {0}")]
    StreamFailed(String),

    #[error("overlay failed: {0}")]
    OverlayFailed(String),

    #[error("invalid session state: {0}")]
    InvalidState(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),
}
