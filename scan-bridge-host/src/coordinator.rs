use std::sync::Arc;

use parking_lot::Mutex;

use scan_bridge_core::{
    CameraProvider, OverlayHost, ScanDelegate, ScanError, ScanMode, ScanResult, ScanSession,
    SessionStatus,
};

use crate::action::{parse_action, NavigationKind, NavigationPolicy, NavigationRequest, UrlAction};
use crate::bridge::{update_script, PreviewSink, WebHost};
use crate::config::HostConfig;
use crate::error::HostError;

/// Platform services the coordinator needs for each new session.
pub trait HostPlatform {
    type Camera: CameraProvider;

    /// A camera capability for a fresh session.
    fn camera(&mut self) -> Self::Camera;

    /// The host view the next session presents its preview and overlay in.
    fn overlay(&mut self) -> Box<dyn OverlayHost>;
}

/// Owns the active scan session and routes its result to the page.
///
/// ```text
/// NavigationRequest → parse_action → ScanSession::start
///                                        ↓ stop (dismiss)
///             WebHost ← BridgeDelegate ← ScanResult
/// ```
///
/// At most one session is live at a time; a scan action arriving while one
/// is running is rejected and the running session is left untouched.
pub struct ScanCoordinator<P: HostPlatform, W: WebHost + 'static> {
    platform: P,
    config: HostConfig,
    web: Arc<Mutex<W>>,
    preview: Option<PreviewSink>,
    active: Option<ScanSession<P::Camera>>,
    last_result: Arc<Mutex<Option<ScanResult>>>,
}

impl<P: HostPlatform, W: WebHost + 'static> ScanCoordinator<P, W> {
    pub fn new(platform: P, web: W, config: HostConfig) -> Result<Self, HostError> {
        config.validate()?;
        Ok(Self {
            platform,
            config,
            web: Arc::new(Mutex::new(web)),
            preview: None,
            active: None,
            last_result: Arc::new(Mutex::new(None)),
        })
    }

    pub fn set_preview_sink(&mut self, sink: PreviewSink) {
        self.preview = Some(sink);
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn web(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.web)
    }

    pub fn active_session(&self) -> Option<&ScanSession<P::Camera>> {
        self.active.as_ref()
    }

    pub fn is_scanning(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|session| !session.status().is_terminal())
    }

    /// The outcome of the most recently ended session.
    pub fn last_result(&self) -> Option<ScanResult> {
        self.last_result.lock().clone()
    }

    /// Decide whether the web view may follow `request`.
    ///
    /// Link-activated scan actions are consumed (`Cancel`) and start a
    /// session; everything else is allowed through.
    pub fn decide_policy(&mut self, request: &NavigationRequest) -> NavigationPolicy {
        if request.kind != NavigationKind::LinkActivated {
            return NavigationPolicy::Allow;
        }
        match parse_action(&request.url, &self.config) {
            Some(UrlAction::Camera(mode)) => {
                if let Err(e) = self.begin_scan(mode) {
                    log::warn!("scan action ignored: {}", e);
                }
                NavigationPolicy::Cancel
            }
            None => NavigationPolicy::Allow,
        }
    }

    /// Create and start a session in `mode`.
    ///
    /// Fails only when a session is already running. Permission and capture
    /// failures are reported through the page like any other result.
    pub fn begin_scan(&mut self, mode: ScanMode) -> Result<ScanSession<P::Camera>, HostError> {
        if self.is_scanning() {
            return Err(ScanError::InvalidState("a scan session is already running".into()).into());
        }

        let session = ScanSession::new(self.platform.camera(), self.config.scan_configuration());
        session.set_delegate(Arc::new(BridgeDelegate {
            web: Arc::clone(&self.web),
            config: self.config.clone(),
            preview: self.preview.clone(),
            last_result: Arc::clone(&self.last_result),
        }));
        log::debug!("session {}: created for {:?}", session.id(), mode);

        session.start(self.platform.overlay(), mode)?;
        self.active = Some(session.clone());
        Ok(session)
    }

    /// The host view's dismiss action. Returns `true` if it ended a session.
    pub fn dismiss(&mut self) -> bool {
        match &self.active {
            Some(session) => session.stop(),
            None => false,
        }
    }
}

/// Maps session events onto the web host.
struct BridgeDelegate<W: WebHost> {
    web: Arc<Mutex<W>>,
    config: HostConfig,
    preview: Option<PreviewSink>,
    last_result: Arc<Mutex<Option<ScanResult>>>,
}

impl<W: WebHost + 'static> ScanDelegate for BridgeDelegate<W> {
    fn on_status_changed(&self, status: SessionStatus) {
        log::debug!("scan status: {}", status.as_str());
    }

    fn on_code_observed(&self, raw_code: &str) {
        if let Some(ref preview) = self.preview {
            preview(raw_code);
        }
    }

    fn on_session_ended(&self, result: &ScanResult) {
        match result {
            ScanResult::Recognized(payload) => {
                if payload.is_partial() {
                    log::warn!("scanned payload has missing fields");
                }
                let script = update_script(
                    &self.config.bridge_function,
                    payload,
                    &self.config.expiry_display_format,
                );
                self.web.lock().evaluate_script(&script);
            }
            ScanResult::PermissionDenied => {
                self.web.lock().present_alert(
                    &self.config.permission_alert_title,
                    &self.config.permission_alert_message,
                );
            }
            ScanResult::CaptureFailed(e) => log::error!("scan failed: {}", e),
            ScanResult::NoCode => log::info!("scan ended without a code"),
        }
        *self.last_result.lock() = Some(result.clone());
    }
}
