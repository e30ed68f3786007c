use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::models::capture_models::{MetadataObject, ScanDiagnostics};
use crate::models::config::ScanConfiguration;
use crate::models::error::ScanError;
use crate::models::scan_mode::ScanMode;
use crate::models::scan_result::ScanResult;
use crate::models::state::SessionStatus;
use crate::parser::payload_parser;
use crate::session::pipeline_guard::PipelineGuard;
use crate::traits::camera_provider::{CameraProvider, CapturePipeline, MetadataCallback};
use crate::traits::overlay_host::OverlayHost;
use crate::traits::scan_delegate::ScanDelegate;

/// Internal mutable session state, protected by `parking_lot::Mutex`.
struct SessionState<C: CameraProvider> {
    status: SessionStatus,
    mode: Option<ScanMode>,
    camera: C,
    pipeline: Option<PipelineGuard<C::Pipeline>>,
    overlay: Option<Box<dyn OverlayHost>>,
    last_observed_code: Option<String>,
    delegate: Option<Arc<dyn ScanDelegate>>,
    diagnostics: ScanDiagnostics,
}

impl<C: CameraProvider> Drop for SessionState<C> {
    fn drop(&mut self) {
        if self.pipeline.is_some() || self.overlay.is_some() {
            log::warn!("scan session dropped without stop, releasing capture");
        }
        if let Some(mut overlay) = self.overlay.take() {
            overlay.dismiss();
        }
        // PipelineGuard halts the stream on drop.
    }
}

struct Shared<C: CameraProvider> {
    id: Uuid,
    config: ScanConfiguration,
    state: Mutex<SessionState<C>>,
}

/// One attempt to scan and resolve a single code.
///
/// ```text
/// [CameraProvider] → open → [PipelineGuard] → observer → last_observed_code
///                                                            ↓ stop()
///                                     ScanDelegate ← ScanResult (once)
/// ```
///
/// `ScanSession` is a cheap handle: clones share the same session, so the
/// overlay's dismiss action and the delegate can both hold one and call
/// `stop()`. Decoded codes are only remembered while running; the final
/// result is produced by `stop()`, never by a decode callback.
pub struct ScanSession<C: CameraProvider> {
    shared: Arc<Shared<C>>,
}

impl<C: CameraProvider> Clone for ScanSession<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: CameraProvider> ScanSession<C> {
    pub fn new(camera: C, config: ScanConfiguration) -> Self {
        let state = SessionState {
            status: SessionStatus::Idle,
            mode: None,
            camera,
            pipeline: None,
            overlay: None,
            last_observed_code: None,
            delegate: None,
            diagnostics: ScanDiagnostics::default(),
        };
        Self {
            shared: Arc::new(Shared {
                id: Uuid::new_v4(),
                config,
                state: Mutex::new(state),
            }),
        }
    }

    pub fn set_delegate(&self, delegate: Arc<dyn ScanDelegate>) {
        self.shared.state.lock().delegate = Some(delegate);
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn status(&self) -> SessionStatus {
        self.shared.state.lock().status
    }

    /// The mode chosen at `start`, if the session was started.
    pub fn mode(&self) -> Option<ScanMode> {
        self.shared.state.lock().mode
    }

    pub fn last_observed_code(&self) -> Option<String> {
        self.shared.state.lock().last_observed_code.clone()
    }

    pub fn diagnostics(&self) -> ScanDiagnostics {
        self.shared.state.lock().diagnostics
    }

    /// Start scanning. Transitions: idle → requesting → running.
    ///
    /// A denied permission ends the session with `PermissionDenied` before
    /// `Requesting` is announced. A failed pipeline setup ends it with
    /// `CaptureFailed`. Both still return `Ok`. A `stop()` from the
    /// `Requesting` callback ends the session before any device is opened.
    /// `Err` is only returned when the session is not idle, in which case
    /// nothing is touched.
    pub fn start(&self, host: Box<dyn OverlayHost>, mode: ScanMode) -> Result<(), ScanError> {
        let id = self.shared.id;
        let permission = {
            let mut s = self.shared.state.lock();
            if !s.status.is_idle() {
                log::warn!("session {}: start rejected in {} state", id, s.status.as_str());
                return Err(ScanError::InvalidState(format!(
                    "cannot start from {} state",
                    s.status.as_str()
                )));
            }
            s.status = SessionStatus::Requesting;
            s.mode = Some(mode);
            s.camera.authorization_status()
        };

        if !permission.permits_capture() {
            log::info!("session {}: camera permission denied", id);
            self.finish(|_| ScanResult::PermissionDenied);
            return Ok(());
        }

        self.notify_status(SessionStatus::Requesting);
        if self.status() != SessionStatus::Requesting {
            // The delegate stopped the session; nothing may be acquired now.
            log::debug!("session {}: stopped before capture setup", id);
            return Ok(());
        }

        let guard = match self.acquire_pipeline(mode) {
            Ok(guard) => guard,
            Err(e) => {
                log::error!("session {}: capture setup failed: {}", id, e);
                self.finish(move |_| ScanResult::CaptureFailed(e));
                return Ok(());
            }
        };

        let mut host = host;
        if let Err(e) = host.present(mode, mode.overlay_asset()) {
            log::error!("session {}: overlay failed: {}", id, e);
            guard.release();
            self.finish(move |_| ScanResult::CaptureFailed(e));
            return Ok(());
        }

        let mut s = self.shared.state.lock();
        if s.status != SessionStatus::Requesting {
            // stop() ran while the pipeline was being set up.
            drop(s);
            log::debug!("session {}: stopped during setup, releasing", id);
            guard.release();
            host.dismiss();
            return Ok(());
        }
        s.pipeline = Some(guard);
        s.overlay = Some(host);
        s.status = SessionStatus::Running;
        drop(s);

        log::info!("session {}: scanning ({:?})", id, mode);
        self.notify_status(SessionStatus::Running);
        Ok(())
    }

    /// Frame tick from the metadata output.
    ///
    /// The first object with an accepted symbology and a string value
    /// becomes the current code; everything after it in the same tick is
    /// ignored. Ticks arriving outside `Running` are dropped.
    pub fn on_metadata(&self, objects: &[MetadataObject]) {
        let (code, delegate) = {
            let mut s = self.shared.state.lock();
            if !s.status.is_running() {
                log::trace!("session {}: tick outside running state dropped", self.shared.id);
                return;
            }
            s.diagnostics.ticks_received += 1;

            let mode = s.mode.unwrap_or_default();
            let mut winner: Option<&str> = None;
            for object in objects {
                match object.string_value.as_deref() {
                    Some(value) if winner.is_none() && mode.accepts(object.symbology) => {
                        winner = Some(value);
                    }
                    _ => s.diagnostics.objects_ignored += 1,
                }
            }

            let Some(code) = winner else {
                return;
            };
            let delegate = self.record(&mut s, code);
            (code.to_owned(), delegate)
        };

        if let Some(delegate) = delegate {
            delegate.on_code_observed(&code);
        }
    }

    /// A single decoded code, bypassing symbology selection.
    pub fn on_decoded(&self, raw_code: &str) {
        let delegate = {
            let mut s = self.shared.state.lock();
            if !s.status.is_running() {
                log::trace!("session {}: decode outside running state dropped", self.shared.id);
                return;
            }
            s.diagnostics.ticks_received += 1;
            self.record(&mut s, raw_code)
        };

        if let Some(delegate) = delegate {
            delegate.on_code_observed(raw_code);
        }
    }

    /// Stop scanning and deliver the result. Transitions: * → stopped.
    ///
    /// Delivers `Recognized` with the parsed last observed code, or
    /// `NoCode`. Returns `false` (and does nothing) if the session had
    /// already ended.
    pub fn stop(&self) -> bool {
        let ended = self.finish(|s| match &s.last_observed_code {
            Some(code) => ScanResult::Recognized(payload_parser::parse(code)),
            None => ScanResult::NoCode,
        });
        if !ended {
            log::debug!("session {}: stop ignored, already stopped", self.shared.id);
        }
        ended
    }

    // --- Internal helpers ---

    fn acquire_pipeline(&self, mode: ScanMode) -> Result<PipelineGuard<C::Pipeline>, ScanError> {
        let pipeline = self.shared.state.lock().camera.open_device()?;
        let mut guard = PipelineGuard::new(pipeline);
        guard.pipeline_mut().attach_input()?;
        guard.pipeline_mut().attach_output(mode.symbologies())?;
        guard.pipeline_mut().set_observer(self.observer());
        guard.start_stream()?;
        Ok(guard)
    }

    /// Observer handed to the pipeline. Holds the session weakly so the
    /// pipeline never keeps its own owner alive.
    fn observer(&self) -> MetadataCallback {
        let weak: Weak<Shared<C>> = Arc::downgrade(&self.shared);
        Arc::new(move |objects: &[MetadataObject]| {
            if let Some(shared) = weak.upgrade() {
                ScanSession { shared }.on_metadata(objects);
            }
        })
    }

    fn record(&self, s: &mut SessionState<C>, code: &str) -> Option<Arc<dyn ScanDelegate>> {
        s.last_observed_code = Some(code.to_owned());
        s.diagnostics.codes_observed += 1;
        log::debug!("session {}: code observed ({} bytes)", self.shared.id, code.len());
        if self.shared.config.forward_preview {
            s.delegate.clone()
        } else {
            None
        }
    }

    /// Move to `Stopped` and deliver `outcome` unless already stopped.
    /// Capture and overlay are released before the delegate hears about it.
    fn finish(&self, outcome: impl FnOnce(&SessionState<C>) -> ScanResult) -> bool {
        let (result, pipeline, overlay, delegate) = {
            let mut s = self.shared.state.lock();
            if s.status.is_terminal() {
                return false;
            }
            let result = outcome(&s);
            s.status = SessionStatus::Stopped;
            (result, s.pipeline.take(), s.overlay.take(), s.delegate.clone())
        };

        if let Some(pipeline) = pipeline {
            pipeline.release();
        }
        if let Some(mut overlay) = overlay {
            overlay.dismiss();
        }

        log::info!("session {}: ended with {}", self.shared.id, result.kind());
        if let Some(delegate) = delegate {
            delegate.on_status_changed(SessionStatus::Stopped);
            delegate.on_session_ended(&result);
        }
        true
    }

    fn notify_status(&self, status: SessionStatus) {
        let delegate = self.shared.state.lock().delegate.clone();
        if let Some(delegate) = delegate {
            delegate.on_status_changed(status);
        }
    }
}
