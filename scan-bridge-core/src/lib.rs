//! # scan-bridge-core
//!
//! Platform-agnostic barcode scanning core.
//!
//! Provides GS1-style payload parsing, scan mode tables, and the scan
//! session lifecycle. Platform code (camera stack, host view) implements
//! the `CameraProvider` and `OverlayHost` traits and plugs into the
//! generic `ScanSession`.
//!
//! ## Architecture
//!
//! ```text
//! scan-bridge-core (this crate)
//! ├── traits/   ← CameraProvider, CapturePipeline, OverlayHost, ScanDelegate
//! ├── models/   ← ScanError, ScanMode, ScanResult, DecodedPayload, SessionStatus, etc.
//! ├── parser/   ← payload parsing and expiry formatting
//! └── session/  ← ScanSession (lifecycle orchestrator), PipelineGuard
//! ```

pub mod models;
pub mod parser;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::capture_models::{CameraPermission, MetadataObject, ScanDiagnostics, Symbology};
pub use models::config::ScanConfiguration;
pub use models::error::ScanError;
pub use models::payload::DecodedPayload;
pub use models::scan_mode::ScanMode;
pub use models::scan_result::ScanResult;
pub use models::state::SessionStatus;
pub use parser::payload_parser::{format_expiry, parse};
pub use session::pipeline_guard::PipelineGuard;
pub use session::scan_session::ScanSession;
pub use traits::camera_provider::{CameraProvider, CapturePipeline, MetadataCallback};
pub use traits::overlay_host::OverlayHost;
pub use traits::scan_delegate::ScanDelegate;
