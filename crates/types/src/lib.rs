//! Shared type definitions for the Évoque storefront front-end.
//!
//! The navigation tree ([`NavData`] and friends) is the single source of
//! truth for every navigation surface: the menubar, the mega-menu panels, the
//! mobile drawer and the command palette. The small enums in this module are
//! shared between the headless controller and the terminal front-end.

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub mod nav;

pub use nav::{MegaGroup, NavData, NavDataError, NavDataIssue, NavLink, NavSection};

/// Side effects requested by navigation handlers.
///
/// Handlers never talk to the routing collaborator directly; they return
/// effects and the host applies them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Navigate to the given path (or absolute URL).
    Navigate(String),
}

/// Layout direction of the hosting document.
///
/// Read once when the navigation controller mounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

impl FromStr for Direction {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Self::Ltr),
            "rtl" => Ok(Self::Rtl),
            _ => Err(ParseEnumError::new("direction", "ltr, rtl")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        })
    }
}

/// Color scheme of the storefront.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The opposite mode, used by the theme toggle.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

impl FromStr for ThemeMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseEnumError::new("theme", "light, dark")),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    expected: &'static str,
}

impl ParseEnumError {
    fn new(kind: &'static str, expected: &'static str) -> Self {
        Self { kind, expected }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}; expected one of: {}", self.kind, self.expected)
    }
}

impl Error for ParseEnumError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("RTL".parse::<Direction>(), Ok(Direction::Rtl));
        assert_eq!(" ltr ".parse::<Direction>(), Ok(Direction::Ltr));
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn theme_mode_toggles_and_round_trips() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.to_string().parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
    }
}
