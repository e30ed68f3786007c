pub mod pipeline_guard;
pub mod scan_session;
