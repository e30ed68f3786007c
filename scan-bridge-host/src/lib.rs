//! # scan-bridge-host
//!
//! Host-side glue for scan-bridge.
//!
//! Provides:
//! - `action` — recognition of `app://...?camera=<mode>` navigations
//! - `bridge` — the `WebHost` sink and result script templating
//! - `coordinator` — `ScanCoordinator`, owner of the active session
//! - `config` — `HostConfig`, loaded from JSON
//! - `simulator` — scripted camera, overlay and web host
//!
//! ## Usage
//! ```ignore
//! use scan_bridge_host::{HostConfig, NavigationRequest, ScanCoordinator};
//!
//! let mut coordinator = ScanCoordinator::new(platform, web_view, HostConfig::default())?;
//! let policy = coordinator.decide_policy(&NavigationRequest::link("app://scan?camera=qr"));
//! // ... user taps "OK" on the overlay:
//! coordinator.dismiss();
//! ```

pub mod action;
pub mod bridge;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod simulator;

pub use action::{parse_action, NavigationKind, NavigationPolicy, NavigationRequest, UrlAction};
pub use bridge::{update_script, PreviewSink, WebHost};
pub use config::HostConfig;
pub use coordinator::{HostPlatform, ScanCoordinator};
pub use error::HostError;
pub use simulator::{RecordingWebHost, ScriptedCamera, ScriptedFeed, SimulatedPlatform};
