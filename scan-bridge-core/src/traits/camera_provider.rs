use std::sync::Arc;

use crate::models::capture_models::{CameraPermission, MetadataObject, Symbology};
use crate::models::error::ScanError;

/// Callback invoked once per captured frame tick with the objects the
/// metadata output recognized, in the order the platform reported them.
pub type MetadataCallback = Arc<dyn Fn(&[MetadataObject]) + Send + Sync + 'static>;

/// Platform camera capability.
///
/// Implementations wrap the native capture stack (AVFoundation, CameraX, ...).
pub trait CameraProvider: Send + 'static {
    type Pipeline: CapturePipeline;

    /// Current camera authorization. Must not block on a user prompt.
    fn authorization_status(&self) -> CameraPermission;

    /// Acquire the default video device and wrap it in a fresh pipeline.
    fn open_device(&mut self) -> Result<Self::Pipeline, ScanError>;
}

/// An opened capture device with its input and metadata output.
///
/// The observer must be invoked asynchronously, never from inside
/// `start_stream` itself.
pub trait CapturePipeline: Send + 'static {
    /// Bind the device as the pipeline input.
    fn attach_input(&mut self) -> Result<(), ScanError>;

    /// Add the metadata output, recognizing only `types`.
    fn attach_output(&mut self, types: &[Symbology]) -> Result<(), ScanError>;

    /// Register the frame observer. Replaces any previous observer.
    fn set_observer(&mut self, callback: MetadataCallback);

    fn start_stream(&mut self) -> Result<(), ScanError>;

    /// Halt streaming. Safe to call when not streaming.
    fn stop_stream(&mut self);
}
