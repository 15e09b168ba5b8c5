use ratatui::style::Color;

use crate::config::{self, ThemeConfig};

use super::widgets::parse_color;

/// Resolved palette handed to every render function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub paper: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub error: Color,
}

impl Theme {
    /// Unparseable entries fall back to the stock color for that slot
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let pick = |value: &str, fallback: fn() -> String| {
            parse_color(value)
                .or_else(|| parse_color(&fallback()))
                .unwrap_or(Color::Reset)
        };

        Self {
            primary: pick(&cfg.primary, config::default_primary),
            secondary: pick(&cfg.secondary, config::default_secondary),
            background: pick(&cfg.background, config::default_background),
            paper: pick(&cfg.paper, config::default_paper),
            text_primary: pick(&cfg.text_primary, config::default_text_primary),
            text_secondary: pick(&cfg.text_secondary, config::default_text_secondary),
            error: pick(&cfg.error, config::default_error),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
