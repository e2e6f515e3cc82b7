//! Theme styling module for the storefront UI layer.
//!
//! Two palettes exist, [`LinenTheme`] (light) and [`NocturneTheme`] (dark).
//! The active [`ThemeMode`] lives in a [`ThemeProvider`]; widgets read the
//! mode through an explicit [`watch`] subscription instead of observing
//! global state, and the provider persists every change to the user's
//! preferences.

use std::env;
use std::sync::Arc;

use evoque_types::ThemeMode;
use evoque_util::UserPreferences;
use tokio::sync::watch;
use tracing::{debug, warn};

pub mod linen;
pub mod nocturne;
pub mod roles;
pub mod theme_helpers;

pub use linen::LinenTheme;
pub use nocturne::NocturneTheme;
pub use roles::{Theme, ThemeRoles};

/// Environment variable forcing the initial theme (`light` or `dark`).
pub const THEME_ENV: &str = "EVOQUE_THEME";

/// Builds the palette for `mode`.
pub fn theme_for(mode: ThemeMode) -> Box<dyn Theme> {
    match mode {
        ThemeMode::Light => Box::new(LinenTheme::new()),
        ThemeMode::Dark => Box::new(NocturneTheme::new()),
    }
}

/// Picks the boot theme: command-line override, then [`THEME_ENV`], then the
/// stored preference, then the terminal's background hint, then light.
pub fn resolve_initial_mode(cli_override: Option<ThemeMode>, preferences: &UserPreferences) -> ThemeMode {
    if let Some(mode) = cli_override {
        return mode;
    }
    if let Ok(value) = env::var(THEME_ENV) {
        match value.parse::<ThemeMode>() {
            Ok(mode) => return mode,
            Err(error) => warn!(%value, %error, "ignoring {THEME_ENV}"),
        }
    }
    if let Some(mode) = preferences.theme() {
        return mode;
    }
    if let Some(mode) = env::var("COLORFGBG").ok().and_then(|value| mode_from_colorfgbg(&value)) {
        debug!(?mode, "theme inferred from terminal background");
        return mode;
    }
    ThemeMode::Light
}

/// Reads the background index from a `COLORFGBG` value such as `15;0` or
/// `12;default;8`. Indices 0-6 and 8 are dark backgrounds.
fn mode_from_colorfgbg(value: &str) -> Option<ThemeMode> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    if background < 7 || background == 8 {
        Some(ThemeMode::Dark)
    } else {
        Some(ThemeMode::Light)
    }
}

/// Owner of the current [`ThemeMode`].
#[derive(Debug)]
pub struct ThemeProvider {
    sender: watch::Sender<ThemeMode>,
    preferences: Arc<UserPreferences>,
}

impl ThemeProvider {
    pub fn new(initial: ThemeMode, preferences: Arc<UserPreferences>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender, preferences }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.sender.borrow()
    }

    /// A receiver that observes every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.sender.subscribe()
    }

    /// Switches to `mode` and persists it. Persistence failures are logged;
    /// the in-memory switch still happens.
    pub fn set_mode(&self, mode: ThemeMode) {
        if self.mode() == mode {
            return;
        }
        self.sender.send_replace(mode);
        debug!(%mode, "theme changed");
        if let Err(error) = self.preferences.set_theme(Some(mode)) {
            warn!(%error, "failed to persist theme preference");
        }
    }

    pub fn toggle(&self) -> ThemeMode {
        let next = self.mode().toggled();
        self.set_mode(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(mode: Option<ThemeMode>) -> (tempfile::TempDir, UserPreferences) {
        let dir = tempfile::tempdir().unwrap();
        let preferences = UserPreferences::at_path(dir.path().join("preferences.json")).unwrap();
        preferences.set_theme(mode).unwrap();
        (dir, preferences)
    }

    #[test]
    fn colorfgbg_background_index_decides() {
        assert_eq!(mode_from_colorfgbg("15;0"), Some(ThemeMode::Dark));
        assert_eq!(mode_from_colorfgbg("12;default;8"), Some(ThemeMode::Dark));
        assert_eq!(mode_from_colorfgbg("0;15"), Some(ThemeMode::Light));
        assert_eq!(mode_from_colorfgbg("0;7"), Some(ThemeMode::Light));
        assert_eq!(mode_from_colorfgbg("garbage"), None);
    }

    #[test]
    fn boot_order_prefers_override_then_env_then_stored() {
        let (_dir, preferences) = stored(Some(ThemeMode::Dark));
        temp_env::with_vars([(THEME_ENV, Some("light")), ("COLORFGBG", None)], || {
            assert_eq!(resolve_initial_mode(Some(ThemeMode::Dark), &preferences), ThemeMode::Dark);
            assert_eq!(resolve_initial_mode(None, &preferences), ThemeMode::Light);
        });
        temp_env::with_vars([(THEME_ENV, None::<&str>), ("COLORFGBG", Some("0;15"))], || {
            assert_eq!(resolve_initial_mode(None, &preferences), ThemeMode::Dark);
        });
    }

    #[test]
    fn falls_back_to_terminal_hint_then_light() {
        let (_dir, preferences) = stored(None);
        temp_env::with_vars([(THEME_ENV, None::<&str>), ("COLORFGBG", Some("15;0"))], || {
            assert_eq!(resolve_initial_mode(None, &preferences), ThemeMode::Dark);
        });
        temp_env::with_vars([(THEME_ENV, Some("sepia")), ("COLORFGBG", None)], || {
            assert_eq!(resolve_initial_mode(None, &preferences), ThemeMode::Light);
        });
    }

    #[test]
    fn toggle_notifies_subscribers_and_persists() {
        let (_dir, preferences) = stored(None);
        let preferences = Arc::new(preferences);
        let provider = ThemeProvider::new(ThemeMode::Light, Arc::clone(&preferences));
        let mut receiver = provider.subscribe();
        assert!(!receiver.has_changed().unwrap());

        assert_eq!(provider.toggle(), ThemeMode::Dark);
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), ThemeMode::Dark);
        assert_eq!(preferences.theme(), Some(ThemeMode::Dark));

        let reloaded = UserPreferences::at_path(preferences.path()).unwrap();
        assert_eq!(reloaded.theme(), Some(ThemeMode::Dark));
    }

    #[test]
    fn palettes_match_modes() {
        assert_eq!(theme_for(ThemeMode::Light).roles().background, linen::OFF_WHITE);
        assert_eq!(theme_for(ThemeMode::Dark).roles().background, nocturne::GRAY_900);
    }
}
