use serde::{Deserialize, Serialize};

use super::capture_models::Symbology;

/// Which family of codes a session accepts.
///
/// Chosen once when a session starts. Each mode maps to a fixed symbology
/// filter and the overlay image drawn over the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    #[default]
    Both,
    Square,
    Bar,
}

impl ScanMode {
    /// Resolve the value of a `camera=<token>` action parameter.
    ///
    /// Unknown tokens fall back to `Both`.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "" | "both" => Self::Both,
            "qr" | "square" => Self::Square,
            "bar" => Self::Bar,
            other => {
                log::debug!("unrecognized camera token {:?}, using both", other);
                Self::Both
            }
        }
    }

    pub fn symbologies(&self) -> &'static [Symbology] {
        match self {
            Self::Both => &[Symbology::Ean13, Symbology::Qr, Symbology::DataMatrix],
            Self::Bar => &[Symbology::Ean13, Symbology::Qr],
            Self::Square => &[Symbology::Ean13, Symbology::DataMatrix],
        }
    }

    /// Asset name of the overlay image for this mode.
    pub fn overlay_asset(&self) -> &'static str {
        match self {
            Self::Both => "qr+barcode-view",
            Self::Bar => "barcode-view",
            Self::Square => "qr-view",
        }
    }

    pub fn accepts(&self, symbology: Symbology) -> bool {
        self.symbologies().contains(&symbology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_resolve_to_modes() {
        assert_eq!(ScanMode::from_token(""), ScanMode::Both);
        assert_eq!(ScanMode::from_token("qr"), ScanMode::Square);
        assert_eq!(ScanMode::from_token("bar"), ScanMode::Bar);
        assert_eq!(ScanMode::from_token("square"), ScanMode::Square);
        assert_eq!(ScanMode::from_token("BAR"), ScanMode::Bar);
    }

    #[test]
    fn unknown_token_defaults_to_both() {
        assert_eq!(ScanMode::from_token("pdf417"), ScanMode::Both);
        assert_eq!(ScanMode::from_token("  "), ScanMode::Both);
    }

    #[test]
    fn symbology_table() {
        assert!(ScanMode::Both.accepts(Symbology::DataMatrix));
        assert!(ScanMode::Bar.accepts(Symbology::Qr));
        assert!(!ScanMode::Bar.accepts(Symbology::DataMatrix));
        assert!(!ScanMode::Square.accepts(Symbology::Qr));
        assert_eq!(ScanMode::Both.symbologies().len(), 3);
    }

    #[test]
    fn overlay_assets_are_distinct() {
        assert_eq!(ScanMode::Both.overlay_asset(), "qr+barcode-view");
        assert_eq!(ScanMode::Bar.overlay_asset(), "barcode-view");
        assert_eq!(ScanMode::Square.overlay_asset(), "qr-view");
    }
}
