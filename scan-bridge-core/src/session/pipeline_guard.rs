use crate::models::error::ScanError;
use crate::traits::camera_provider::CapturePipeline;

/// Owns an opened pipeline and halts its stream when dropped.
///
/// Every exit path out of a session (explicit stop, failure half-way
/// through setup, or the session simply going away) releases the device.
pub struct PipelineGuard<P: CapturePipeline> {
    pipeline: P,
    streaming: bool,
}

impl<P: CapturePipeline> PipelineGuard<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            streaming: false,
        }
    }

    pub fn pipeline_mut(&mut self) -> &mut P {
        &mut self.pipeline
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    pub fn start_stream(&mut self) -> Result<(), ScanError> {
        self.pipeline.start_stream()?;
        self.streaming = true;
        Ok(())
    }

    /// Halt the stream now. Consumes the guard.
    pub fn release(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        if self.streaming {
            self.pipeline.stop_stream();
            self.streaming = false;
            log::debug!("capture stream halted");
        }
    }
}

impl<P: CapturePipeline> Drop for PipelineGuard<P> {
    fn drop(&mut self) {
        self.halt();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::models::capture_models::Symbology;
    use crate::traits::camera_provider::MetadataCallback;

    struct CountingPipeline {
        stops: Arc<AtomicUsize>,
        fail_start: bool,
    }

    impl CapturePipeline for CountingPipeline {
        fn attach_input(&mut self) -> Result<(), ScanError> {
            Ok(())
        }

        fn attach_output(&mut self, _types: &[Symbology]) -> Result<(), ScanError> {
            Ok(())
        }

        fn set_observer(&mut self, _callback: MetadataCallback) {}

        fn start_stream(&mut self) -> Result<(), ScanError> {
            if self.fail_start {
                return Err(ScanError::StreamFailed("busy".into()));
            }
            Ok(())
        }

        fn stop_stream(&mut self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn pipeline(fail_start: bool) -> (CountingPipeline, Arc<AtomicUsize>) {
        let stops = Arc::new(AtomicUsize::new(0));
        let p = CountingPipeline {
            stops: Arc::clone(&stops),
            fail_start,
        };
        (p, stops)
    }

    #[test]
    fn drop_halts_running_stream() {
        let (p, stops) = pipeline(false);
        let mut guard = PipelineGuard::new(p);
        guard.start_stream().unwrap();
        assert!(guard.is_streaming());
        drop(guard);
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn release_stops_exactly_once() {
        let (p, stops) = pipeline(false);
        let mut guard = PipelineGuard::new(p);
        guard.start_stream().unwrap();
        guard.release();
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn never_started_is_not_stopped() {
        let (p, stops) = pipeline(true);
        let mut guard = PipelineGuard::new(p);
        assert!(guard.start_stream().is_err());
        assert!(!guard.is_streaming());
        drop(guard);
        assert_eq!(stops.load(Ordering::SeqCst), 0);
    }
}
