//! Application state shared by the runtime and every component.

use std::sync::Arc;

use evoque_nav::{HeaderLayout, HistoryRouter, NavigationController, PanelTransition, Router, apply_effects};
use evoque_types::{Direction, Effect, NavData, ThemeMode};
use evoque_util::UserPreferences;
use tokio::sync::watch;
use tracing::debug;

use crate::market::{MarketBoard, MarketOutcome};
use crate::ui::hit_map::HitMap;
use crate::ui::theme::{self, Theme, ThemeProvider};

/// Default width, in columns, below which the header collapses into the
/// drawer toggle.
pub const DEFAULT_BREAKPOINT: u16 = 100;

/// Start-up configuration resolved by the binary.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub data: NavData,
    pub direction: Direction,
    /// Forces the initial theme, skipping env and stored preference.
    pub theme: Option<ThemeMode>,
    /// Skip market fetches entirely.
    pub offline: bool,
    pub breakpoint: u16,
}

impl TuiOptions {
    pub fn new(data: NavData) -> Self {
        Self {
            data,
            direction: Direction::Ltr,
            theme: None,
            offline: false,
            breakpoint: DEFAULT_BREAKPOINT,
        }
    }
}

/// Messages fed into [`App::update`] by the runtime.
#[derive(Debug)]
pub enum Msg {
    Tick,
    Resize(u16, u16),
    MarketLoaded(MarketOutcome),
}

pub struct App {
    pub controller: NavigationController,
    pub router: HistoryRouter,
    pub market: MarketBoard,
    /// Regions drawn in the last frame.
    pub hit_map: HitMap,
    /// Palette for the current mode. Replaced whenever the provider changes.
    pub theme: Box<dyn Theme>,
    theme_provider: ThemeProvider,
    theme_updates: watch::Receiver<ThemeMode>,
    breakpoint: u16,
    offline: bool,
}

impl App {
    pub fn new(options: TuiOptions, preferences: Arc<UserPreferences>) -> Self {
        let mode = theme::resolve_initial_mode(options.theme, &preferences);
        let theme_provider = ThemeProvider::new(mode, preferences);
        let theme_updates = theme_provider.subscribe();

        let mut controller = NavigationController::new(Arc::new(options.data), options.direction);
        controller.mount();

        let mut market = MarketBoard::storefront();
        if options.offline {
            market.mark_offline();
        }
        debug!(%mode, breakpoint = options.breakpoint, offline = options.offline, "app initialised");

        Self {
            controller,
            router: HistoryRouter::default(),
            market,
            hit_map: HitMap::default(),
            theme: theme::theme_for(mode),
            theme_provider,
            theme_updates,
            breakpoint: options.breakpoint,
            offline: options.offline,
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_provider.mode()
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn current_path(&self) -> &str {
        self.router.current_path()
    }

    /// Header layout for a terminal `width` columns wide.
    pub fn layout_for_width(&self, width: u16) -> HeaderLayout {
        if width < self.breakpoint {
            HeaderLayout::Compact
        } else {
            HeaderLayout::Wide
        }
    }

    /// Whether the runtime should tick quickly.
    pub fn needs_animation(&self) -> bool {
        self.market.is_loading() || self.controller.mega().transition() == PanelTransition::Entering
    }

    /// Applies a message; returns `true` when something visible changed.
    pub fn update(&mut self, msg: Msg) -> bool {
        match msg {
            Msg::Tick => {
                let animating = self.controller.mega().transition() == PanelTransition::Entering;
                self.controller.tick();
                let theme_changed = self.sync_theme();
                animating || theme_changed || self.market.is_loading()
            }
            Msg::Resize(width, _height) => {
                let layout = self.layout_for_width(width);
                if layout != self.controller.layout() {
                    self.controller.set_layout(layout);
                }
                true
            }
            Msg::MarketLoaded(outcome) => self.market.apply(outcome),
        }
    }

    /// Hands handler effects to the router.
    pub fn apply_effects(&mut self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        apply_effects(&mut self.router, effects);
    }

    /// Router back, only while no overlay is open.
    pub fn go_back(&mut self) -> bool {
        if self.controller.active_overlay() != evoque_nav::Overlay::None {
            return false;
        }
        self.router.back()
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        let mode = self.theme_provider.toggle();
        self.sync_theme();
        mode
    }

    /// Pulls the latest mode from the provider subscription.
    fn sync_theme(&mut self) -> bool {
        if !self.theme_updates.has_changed().unwrap_or(false) {
            return false;
        }
        let mode = *self.theme_updates.borrow_and_update();
        self.theme = theme::theme_for(mode);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evoque_nav::{NodeId, Overlay};

    fn app() -> App {
        let mut options = TuiOptions::new(NavData::storefront());
        options.theme = Some(ThemeMode::Light);
        options.offline = true;
        App::new(options, Arc::new(UserPreferences::ephemeral()))
    }

    #[test]
    fn resize_switches_layout_at_the_breakpoint() {
        let mut app = app();
        app.update(Msg::Resize(120, 40));
        assert_eq!(app.controller.layout(), HeaderLayout::Wide);
        app.update(Msg::Resize(80, 40));
        assert_eq!(app.controller.layout(), HeaderLayout::Compact);
    }

    #[test]
    fn theme_toggle_swaps_the_palette() {
        let mut app = app();
        let light_background = app.theme.roles().background;
        assert_eq!(app.toggle_theme(), ThemeMode::Dark);
        assert_eq!(app.theme_mode(), ThemeMode::Dark);
        assert_ne!(app.theme.roles().background, light_background);
    }

    #[test]
    fn back_is_blocked_while_an_overlay_is_open() {
        let mut app = app();
        app.apply_effects(vec![Effect::Navigate("/collections".to_string())]);
        assert_eq!(app.current_path(), "/collections");

        app.controller.open_palette();
        assert_eq!(app.controller.active_overlay(), Overlay::CommandPalette);
        assert!(!app.go_back());

        app.controller.close_palette();
        assert!(app.go_back());
        assert_eq!(app.current_path(), "/");
        assert_eq!(app.controller.focused(), None::<NodeId>);
    }

    #[test]
    fn offline_board_never_animates() {
        let app = app();
        assert!(app.is_offline());
        assert!(!app.needs_animation());
    }
}
