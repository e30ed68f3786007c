use crate::models::error::ScanError;
use crate::models::scan_mode::ScanMode;

/// Host view that shows the camera preview and the mode's overlay image.
///
/// The host exposes a single user-dismiss action; whoever owns the session
/// wires that action to `ScanSession::stop`.
pub trait OverlayHost: Send {
    /// Attach the preview surface and the overlay named `overlay_asset`.
    fn present(&mut self, mode: ScanMode, overlay_asset: &str) -> Result<(), ScanError>;

    /// Remove the preview and overlay from the host view.
    fn dismiss(&mut self);
}
