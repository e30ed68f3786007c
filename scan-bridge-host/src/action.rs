//! Recognition of scan actions in page navigations.
//!
//! A link such as `app://scan?camera=qr` asks the native side to start a
//! scan in `Square` mode. Everything else is left for the web view.

use scan_bridge_core::ScanMode;

use crate::config::HostConfig;

/// How a navigation was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    LinkActivated,
    Other,
}

/// A navigation the web view is about to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: String,
    pub kind: NavigationKind,
}

impl NavigationRequest {
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: NavigationKind::LinkActivated,
        }
    }

    pub fn other(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: NavigationKind::Other,
        }
    }
}

/// Whether the web view should carry on with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    Allow,
    Cancel,
}

/// Native action encoded in a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlAction {
    Camera(ScanMode),
}

/// Extract an action from `url`, or `None` if the URL is ordinary.
///
/// The scheme must match `config.action_scheme` (case-insensitive) and the
/// first query pair must use `config.action_query_key`. A missing or unknown
/// mode token selects `ScanMode::Both`.
pub fn parse_action(url: &str, config: &HostConfig) -> Option<UrlAction> {
    let scheme = url_scheme(url)?;
    if !scheme.eq_ignore_ascii_case(&config.action_scheme) {
        return None;
    }

    let (key, value) = first_query_pair(url)?;
    if key != config.action_query_key {
        log::debug!("{} URL without {} key passed through", scheme, config.action_query_key);
        return None;
    }
    Some(UrlAction::Camera(ScanMode::from_token(value)))
}

fn url_scheme(url: &str) -> Option<&str> {
    let (scheme, _) = url.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

fn first_query_pair(url: &str) -> Option<(&str, &str)> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let (_, query) = without_fragment.split_once('?')?;
    let pair = query.split('&').next().unwrap_or(query);
    if pair.is_empty() {
        return None;
    }
    Some(pair.split_once('=').unwrap_or((pair, "")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(url: &str) -> Option<UrlAction> {
        parse_action(url, &HostConfig::default())
    }

    #[test]
    fn camera_tokens() {
        assert_eq!(action("app://scan?camera=qr"), Some(UrlAction::Camera(ScanMode::Square)));
        assert_eq!(action("app://scan?camera=bar"), Some(UrlAction::Camera(ScanMode::Bar)));
        assert_eq!(action("app://scan?camera="), Some(UrlAction::Camera(ScanMode::Both)));
        assert_eq!(action("app://scan?camera"), Some(UrlAction::Camera(ScanMode::Both)));
        assert_eq!(action("app://scan?camera=zzz"), Some(UrlAction::Camera(ScanMode::Both)));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(action("APP://scan?camera=bar"), Some(UrlAction::Camera(ScanMode::Bar)));
        assert_eq!(action("app:?camera=qr"), Some(UrlAction::Camera(ScanMode::Square)));
    }

    #[test]
    fn extra_pairs_and_fragments() {
        assert_eq!(
            action("app://scan?camera=bar&source=menu#top"),
            Some(UrlAction::Camera(ScanMode::Bar))
        );
        assert_eq!(action("app://scan?camera=qr#frag"), Some(UrlAction::Camera(ScanMode::Square)));
    }

    #[test]
    fn ordinary_urls_pass_through() {
        assert_eq!(action("https://example.com/?camera=qr"), None);
        assert_eq!(action("http://example.com"), None);
        assert_eq!(action("file:///receive.html"), None);
        assert_eq!(action("app://settings?theme=dark"), None);
        assert_eq!(action("app://scan"), None);
        assert_eq!(action("receive.html"), None);
        assert_eq!(action(""), None);
    }

    #[test]
    fn custom_scheme_and_key() {
        let config = HostConfig {
            action_scheme: "scanner".into(),
            action_query_key: "mode".into(),
            ..HostConfig::default()
        };
        assert_eq!(
            parse_action("scanner://go?mode=qr", &config),
            Some(UrlAction::Camera(ScanMode::Square))
        );
        assert_eq!(parse_action("app://scan?camera=qr", &config), None);
    }
}
