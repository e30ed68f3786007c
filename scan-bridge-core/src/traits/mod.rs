pub mod camera_provider;
pub mod overlay_host;
pub mod scan_delegate;
