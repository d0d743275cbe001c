//! Host-tunable overlay settings.

use serde::{Deserialize, Serialize};

/// Settings the host exposes to its configuration layer, typically bound to
/// console variables or a config file.
///
/// The scales are re-applied every frame so live edits take effect
/// immediately, the way archived console variables behave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Global scale applied to overlay fonts
    pub font_scale: f32,
    /// Global overlay scale, usually used for Hi-DPI displays
    pub display_scale: f32,
    /// Start with the menu bar open
    pub menu_bar: bool,
    /// Start with the UI library demo window open
    pub demo_window: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_scale: 1.0,
            display_scale: 1.0,
            menu_bar: false,
            demo_window: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_unscaled_display() {
        let config = OverlayConfig::default();
        assert_eq!(config.font_scale, 1.0);
        assert_eq!(config.display_scale, 1.0);
        assert!(!config.menu_bar);
        assert!(!config.demo_window);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: OverlayConfig = serde_json::from_str(r#"{"font_scale": 1.5}"#).unwrap();
        assert_eq!(config.font_scale, 1.5);
        assert_eq!(config.display_scale, 1.0);
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = OverlayConfig {
            font_scale: 2.0,
            display_scale: 1.25,
            menu_bar: true,
            demo_window: false,
        };
        let text = serde_json::to_string(&config).unwrap();
        let back: OverlayConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
