//! Scripted stand-ins for the camera, host view and web view.
//!
//! Used by the `scan-sim` binary and by tests: codes are queued on a
//! [`ScriptedFeed`] and delivered to the running session by `pump()`,
//! which plays the role of the platform's capture delivery queue.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use scan_bridge_core::{
    CameraPermission, CameraProvider, CapturePipeline, MetadataCallback, MetadataObject,
    OverlayHost, ScanError, ScanMode, Symbology,
};

use crate::bridge::WebHost;
use crate::coordinator::HostPlatform;

#[derive(Default)]
struct FeedState {
    observer: Option<MetadataCallback>,
    accepted: Vec<Symbology>,
    streaming: bool,
    queued: VecDeque<Vec<MetadataObject>>,
    stream_starts: usize,
    stream_stops: usize,
}

/// Handle for queuing frame ticks and delivering them to the observer.
#[derive(Clone, Default)]
pub struct ScriptedFeed {
    state: Arc<Mutex<FeedState>>,
}

impl ScriptedFeed {
    pub fn queue_tick(&self, objects: Vec<MetadataObject>) {
        self.state.lock().queued.push_back(objects);
    }

    pub fn queue_code(&self, symbology: Symbology, value: &str) {
        self.queue_tick(vec![MetadataObject::new(symbology, value)]);
    }

    /// Deliver queued ticks while the stream runs. Returns how many reached
    /// the observer; a tick whose objects are all filtered out by the
    /// output is consumed but not counted. Ticks left over when the stream
    /// stops stay queued.
    pub fn pump(&self) -> usize {
        let mut delivered = 0;
        loop {
            let (observer, objects) = {
                let mut s = self.state.lock();
                if !s.streaming {
                    break;
                }
                let Some(observer) = s.observer.clone() else {
                    break;
                };
                let Some(tick) = s.queued.pop_front() else {
                    break;
                };
                // The metadata output only reports the types it was configured for.
                let accepted = s.accepted.clone();
                let objects: Vec<MetadataObject> = tick
                    .into_iter()
                    .filter(|o| accepted.contains(&o.symbology))
                    .collect();
                (observer, objects)
            };
            // Lock released: the observer may stop the stream.
            if !objects.is_empty() {
                observer(&objects);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn is_streaming(&self) -> bool {
        self.state.lock().streaming
    }

    pub fn pending(&self) -> usize {
        self.state.lock().queued.len()
    }

    pub fn stream_starts(&self) -> usize {
        self.state.lock().stream_starts
    }

    pub fn stream_stops(&self) -> usize {
        self.state.lock().stream_stops
    }
}

/// Camera capability with a fixed permission and injectable failures.
pub struct ScriptedCamera {
    permission: CameraPermission,
    fail_open: bool,
    fail_input: bool,
    feed: ScriptedFeed,
}

impl ScriptedCamera {
    pub fn new(permission: CameraPermission, feed: ScriptedFeed) -> Self {
        Self {
            permission,
            fail_open: false,
            fail_input: false,
            feed,
        }
    }

    pub fn with_open_failure(mut self, fail: bool) -> Self {
        self.fail_open = fail;
        self
    }

    pub fn with_input_failure(mut self, fail: bool) -> Self {
        self.fail_input = fail;
        self
    }
}

impl CameraProvider for ScriptedCamera {
    type Pipeline = ScriptedPipeline;

    fn authorization_status(&self) -> CameraPermission {
        self.permission
    }

    fn open_device(&mut self) -> Result<ScriptedPipeline, ScanError> {
        if self.fail_open {
            return Err(ScanError::DeviceNotAvailable);
        }
        Ok(ScriptedPipeline {
            feed: self.feed.clone(),
            fail_input: self.fail_input,
        })
    }
}

pub struct ScriptedPipeline {
    feed: ScriptedFeed,
    fail_input: bool,
}

impl CapturePipeline for ScriptedPipeline {
    fn attach_input(&mut self) -> Result<(), ScanError> {
        if self.fail_input {
            return Err(ScanError::InputAttachFailed("scripted input failure".into()));
        }
        Ok(())
    }

    fn attach_output(&mut self, types: &[Symbology]) -> Result<(), ScanError> {
        self.feed.state.lock().accepted = types.to_vec();
        Ok(())
    }

    fn set_observer(&mut self, callback: MetadataCallback) {
        self.feed.state.lock().observer = Some(callback);
    }

    fn start_stream(&mut self) -> Result<(), ScanError> {
        let mut s = self.feed.state.lock();
        s.streaming = true;
        s.stream_starts += 1;
        Ok(())
    }

    fn stop_stream(&mut self) {
        let mut s = self.feed.state.lock();
        if s.streaming {
            s.streaming = false;
            s.stream_stops += 1;
        }
        s.observer = None;
    }
}

/// Host view that only logs what it would show.
pub struct LoggingOverlay;

impl OverlayHost for LoggingOverlay {
    fn present(&mut self, mode: ScanMode, overlay_asset: &str) -> Result<(), ScanError> {
        log::info!("overlay {} presented for {:?}", overlay_asset, mode);
        Ok(())
    }

    fn dismiss(&mut self) {
        log::info!("overlay dismissed");
    }
}

/// Web host that keeps every script and alert it receives.
#[derive(Debug, Default)]
pub struct RecordingWebHost {
    pub scripts: Vec<String>,
    pub alerts: Vec<(String, String)>,
}

impl WebHost for RecordingWebHost {
    fn evaluate_script(&mut self, script: &str) {
        self.scripts.push(script.to_string());
    }

    fn present_alert(&mut self, title: &str, message: &str) {
        self.alerts.push((title.to_string(), message.to_string()));
    }
}

/// Platform made of scripted parts, all sessions sharing one feed.
pub struct SimulatedPlatform {
    permission: CameraPermission,
    fail_open: bool,
    fail_input: bool,
    feed: ScriptedFeed,
}

impl SimulatedPlatform {
    pub fn new(permission: CameraPermission) -> Self {
        Self {
            permission,
            fail_open: false,
            fail_input: false,
            feed: ScriptedFeed::default(),
        }
    }

    pub fn fail_open(&mut self, fail: bool) {
        self.fail_open = fail;
    }

    pub fn fail_input(&mut self, fail: bool) {
        self.fail_input = fail;
    }

    pub fn feed(&self) -> ScriptedFeed {
        self.feed.clone()
    }
}

impl HostPlatform for SimulatedPlatform {
    type Camera = ScriptedCamera;

    fn camera(&mut self) -> ScriptedCamera {
        ScriptedCamera::new(self.permission, self.feed.clone())
            .with_open_failure(self.fail_open)
            .with_input_failure(self.fail_input)
    }

    fn overlay(&mut self) -> Box<dyn OverlayHost> {
        Box::new(LoggingOverlay)
    }
}
