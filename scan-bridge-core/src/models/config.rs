/// Configuration for a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfiguration {
    /// Forward every decoded code to the delegate for in-overlay display
    /// (default: true).
    pub forward_preview: bool,
}

impl Default for ScanConfiguration {
    fn default() -> Self {
        Self {
            forward_preview: true,
        }
    }
}
