//! Persisted light/dark preference

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::core::constants::storage::DARK_MODE_KEY;
use crate::core::error::{GscoutError, Result};
use crate::storage::LocalStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = GscoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(GscoutError::Validation(format!(
                "Unknown theme '{s}'. Expected light or dark."
            ))),
        }
    }
}

/// Theme preference kept under a single boolean key of the local store.
#[derive(Debug, Clone)]
pub struct ThemePreference {
    store: LocalStore,
}

impl ThemePreference {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Saved preference, or the terminal's own background when none is saved.
    pub fn load(&self) -> Result<Theme> {
        Ok(match self.store.get_bool(DARK_MODE_KEY)? {
            Some(dark) => Theme::from_dark(dark),
            None => detect_terminal_theme().unwrap_or_default(),
        })
    }

    pub fn set(&self, theme: Theme) -> Result<()> {
        self.store.set_bool(DARK_MODE_KEY, theme.is_dark())
    }

    /// Flip the current theme and persist the result.
    pub fn toggle(&self) -> Result<Theme> {
        let next = self.load()?.toggled();
        self.set(next)?;
        Ok(next)
    }
}

/// Best-effort background detection from `COLORFGBG` ("fg;bg").
pub fn detect_terminal_theme() -> Option<Theme> {
    let value = env::var("COLORFGBG").ok()?;
    theme_from_colorfgbg(&value)
}

fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    // Colors 0-6 and 8 are the dark half of the 16-color palette
    Some(Theme::from_dark(bg <= 6 || bg == 8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preference() -> (tempfile::TempDir, ThemePreference) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("store.json"));
        (dir, ThemePreference::new(store))
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn test_colorfgbg_detection() {
        assert_eq!(theme_from_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(theme_from_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(theme_from_colorfgbg("default;8"), Some(Theme::Dark));
        assert_eq!(theme_from_colorfgbg("garbage"), None);
    }

    #[test]
    fn test_saved_preference_wins() {
        let (_dir, pref) = preference();
        pref.set(Theme::Dark).unwrap();
        assert_eq!(pref.load().unwrap(), Theme::Dark);

        pref.set(Theme::Light).unwrap();
        assert_eq!(pref.load().unwrap(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let (_dir, pref) = preference();
        pref.set(Theme::Light).unwrap();

        assert_eq!(pref.toggle().unwrap(), Theme::Dark);
        assert_eq!(pref.load().unwrap(), Theme::Dark);
        assert_eq!(pref.toggle().unwrap(), Theme::Light);
        assert_eq!(pref.load().unwrap(), Theme::Light);
    }
}
