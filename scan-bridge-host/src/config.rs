use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use scan_bridge_core::parser::payload_parser;
use scan_bridge_core::ScanConfiguration;

use crate::bridge::is_script_identifier;
use crate::error::HostError;

/// Host-side settings: how actions are recognized and how results reach
/// the page.
///
/// Loaded from JSON; every field is optional and falls back to its default.
/// ```json
/// { "actionScheme": "app", "bridgeFunction": "updateFromNative" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostConfig {
    /// URL scheme of intercepted actions (default: `app`).
    pub action_scheme: String,

    /// Query key that requests a scan (default: `camera`).
    pub action_query_key: String,

    /// Page function receiving `(id, batch, expiry)` (default: `updateFromNative`).
    pub bridge_function: String,

    /// chrono format for the expiry argument (default: `%d/%m/%Y`).
    pub expiry_display_format: String,

    pub permission_alert_title: String,
    pub permission_alert_message: String,

    /// Forward live decodes to the preview sink (default: true).
    pub forward_preview: bool,
}

impl HostConfig {
    pub fn load(path: &Path) -> Result<Self, HostError> {
        let json = fs::read_to_string(path).map_err(|source| HostError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("loaded host config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, HostError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HostError> {
        if self.action_scheme.trim().is_empty() {
            return Err(HostError::InvalidConfig("action scheme must not be empty".into()));
        }
        if self.action_query_key.trim().is_empty() {
            return Err(HostError::InvalidConfig("action query key must not be empty".into()));
        }
        if !is_script_identifier(&self.bridge_function) {
            return Err(HostError::InvalidConfig(format!(
                "bridge function is not a script identifier: {:?}",
                self.bridge_function
            )));
        }
        if !payload_parser::is_valid_display_format(&self.expiry_display_format) {
            return Err(HostError::InvalidConfig(format!(
                "unusable expiry display format: {:?}",
                self.expiry_display_format
            )));
        }
        Ok(())
    }

    pub fn scan_configuration(&self) -> ScanConfiguration {
        ScanConfiguration {
            forward_preview: self.forward_preview,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            action_scheme: "app".into(),
            action_query_key: "camera".into(),
            bridge_function: "updateFromNative".into(),
            expiry_display_format: payload_parser::DISPLAY_FORMAT.into(),
            permission_alert_title: "Camera access denied".into(),
            permission_alert_message: "Allow camera access in Settings to scan codes.".into(),
            forward_preview: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(HostConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = HostConfig::from_json(r#"{ "bridgeFunction": "window.onScan" }"#).unwrap();
        assert_eq!(config.bridge_function, "window.onScan");
        assert_eq!(config.action_scheme, "app");
        assert!(config.forward_preview);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            HostConfig::from_json(r#"{ "actionScheme": "" }"#),
            Err(HostError::InvalidConfig(_))
        ));
        assert!(matches!(
            HostConfig::from_json(r#"{ "bridgeFunction": "alert(1);x" }"#),
            Err(HostError::InvalidConfig(_))
        ));
        assert!(matches!(
            HostConfig::from_json(r#"{ "expiryDisplayFormat": "%Q" }"#),
            Err(HostError::InvalidConfig(_))
        ));
        assert!(matches!(
            HostConfig::from_json("{ not json"),
            Err(HostError::ConfigParse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "actionScheme": "scanner", "forwardPreview": false }}"#).unwrap();

        let config = HostConfig::load(file.path()).unwrap();
        assert_eq!(config.action_scheme, "scanner");
        assert!(!config.scan_configuration().forward_preview);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        match HostConfig::load(&path) {
            Err(HostError::ConfigIo { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected ConfigIo, got {:?}", other),
        }
    }
}
