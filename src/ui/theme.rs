//! Color palettes for the light and dark themes

use crate::core::types::Verdict;
use crate::storage::Theme;
use crate::ui::color::{Colors, colorize};

/// Semantic color roles used by the output module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    Primary,
    Success,
    Warning,
    Error,
    Muted,
    Accent,
    Url,
}

#[derive(Debug, Clone)]
pub struct Palette {
    pub theme: Theme,
    pub primary: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub url: &'static str,
}

impl Palette {
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }

    const LIGHT: Self = Self {
        theme: Theme::Light,
        primary: Colors::BLACK,
        success: Colors::GREEN,
        warning: "\x1b[38;5;166m", // orange reads better than yellow on white
        error: Colors::RED,
        muted: "\x1b[38;5;102m",
        accent: Colors::MAGENTA,
        url: Colors::BLUE,
    };

    const DARK: Self = Self {
        theme: Theme::Dark,
        primary: Colors::BRIGHT_WHITE,
        success: Colors::BRIGHT_GREEN,
        warning: Colors::BRIGHT_YELLOW,
        error: Colors::BRIGHT_RED,
        muted: Colors::DIM,
        accent: Colors::BRIGHT_CYAN,
        url: Colors::CYAN,
    };

    pub fn get_color(&self, color: SemanticColor) -> &'static str {
        match color {
            SemanticColor::Primary => self.primary,
            SemanticColor::Success => self.success,
            SemanticColor::Warning => self.warning,
            SemanticColor::Error => self.error,
            SemanticColor::Muted => self.muted,
            SemanticColor::Accent => self.accent,
            SemanticColor::Url => self.url,
        }
    }

    pub fn paint(&self, text: &str, color: SemanticColor) -> String {
        colorize(text, self.get_color(color))
    }

    /// PASS green, FAIL and errors red, NEUTRAL amber, anything else muted.
    pub fn verdict_color(verdict: &Verdict) -> SemanticColor {
        match verdict {
            Verdict::Pass => SemanticColor::Success,
            Verdict::Fail | Verdict::Error => SemanticColor::Error,
            Verdict::Neutral => SemanticColor::Warning,
            Verdict::Pending | Verdict::NotAvailable | Verdict::Other(_) => SemanticColor::Muted,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}
