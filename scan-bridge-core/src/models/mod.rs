pub mod capture_models;
pub mod config;
pub mod error;
pub mod payload;
pub mod scan_mode;
pub mod scan_result;
pub mod state;
