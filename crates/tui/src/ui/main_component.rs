use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use evoque_nav::Overlay;
use evoque_types::Effect;
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};
use tracing::debug;

use super::components::{
    Component, DrawerComponent, HeaderComponent, HintBarComponent, MegaPanelComponent, PageComponent, PaletteComponent,
};
use super::input::{PointerTracker, key_input_from};
use crate::app::{App, Msg};

const HEADER_HEIGHT: u16 = 3;

/// Root view. Owns every component, routes input to the navigation
/// controller and layers the overlays above the page.
#[derive(Debug, Default)]
pub struct MainView {
    header: HeaderComponent,
    mega_panel: MegaPanelComponent,
    page: PageComponent,
    drawer: DrawerComponent,
    palette: PaletteComponent,
    hint_bar: HintBarComponent,
    pointer: PointerTracker,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `msg` to the app. Returns `true` when a redraw is needed.
    pub fn handle_message(&mut self, app: &mut App, msg: Msg) -> bool {
        if matches!(msg, Msg::Resize(..)) {
            self.pointer.reset_hover();
        }
        app.update(msg)
    }

    /// Keys the view handles itself before the controller sees them.
    fn handle_global_key(app: &mut App, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('t' | 'T')) {
            let mode = app.toggle_theme();
            debug!(%mode, "theme toggled from keyboard");
            return true;
        }
        if key.modifiers.contains(KeyModifiers::ALT) && key.code == KeyCode::Left {
            app.go_back();
            return true;
        }
        false
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if Self::handle_global_key(app, &key) {
            return Vec::new();
        }
        match key_input_from(&key) {
            Some(input) => app.controller.handle_key(input),
            None => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let events = self.pointer.translate(&mouse, &app.hit_map);
        let mut effects = Vec::new();
        for event in events {
            effects.extend(app.controller.handle_pointer(event));
        }
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        app.hit_map.clear();
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let [header_area, page_area, hints_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.page.render(frame, page_area, app);
        self.header.render(frame, header_area, app);
        self.mega_panel.render(frame, page_area, app);

        let overlay = app.controller.active_overlay();
        if overlay != Overlay::None {
            render_overlay(frame, app);
        }
        // Each overlay draws nothing while closed.
        self.drawer.render(frame, area, app);
        self.palette.render(frame, area, app);
        let overlay_hints = match overlay {
            Overlay::MobileDrawer => Some(self.drawer.get_hint_spans(app)),
            Overlay::CommandPalette => Some(self.palette.get_hint_spans(app)),
            Overlay::None => None,
        };

        self.hint_bar.set_overlay_hints(overlay_hints);
        self.hint_bar.render(frame, hints_area, app);
    }
}

fn render_overlay(frame: &mut Frame, app: &App) {
    frame.render_widget(Block::default().style(app.theme.modal_background_style()).dim(), frame.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TuiOptions;
    use crossterm::event::{MouseButton, MouseEventKind};
    use evoque_nav::{HeaderLayout, NodeId, Router};
    use evoque_types::{NavData, ThemeMode};
    use evoque_util::UserPreferences;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn app() -> App {
        let mut options = TuiOptions::new(NavData::storefront());
        options.theme = Some(ThemeMode::Light);
        options.offline = true;
        App::new(options, Arc::new(UserPreferences::ephemeral()))
    }

    fn draw(view: &mut MainView, app: &mut App, terminal: &mut Terminal<TestBackend>) {
        terminal.draw(|frame| view.render(frame, frame.area(), app)).unwrap();
    }

    fn click_at(view: &mut MainView, app: &mut App, column: u16, row: u16) -> Vec<Effect> {
        let mut effects = Vec::new();
        for kind in [MouseEventKind::Down(MouseButton::Left), MouseEventKind::Up(MouseButton::Left)] {
            let event = MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            };
            effects.extend(view.handle_mouse_events(app, event));
        }
        effects
    }

    fn click(view: &mut MainView, app: &mut App, node: NodeId) -> Vec<Effect> {
        let area = app.hit_map.area_of(node).unwrap();
        click_at(view, app, area.x, area.y)
    }

    #[test]
    fn ctrl_k_opens_the_palette_and_escape_closes_it() {
        let mut app = app();
        let mut view = MainView::new();
        view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert_eq!(app.controller.active_overlay(), Overlay::CommandPalette);
        view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.controller.active_overlay(), Overlay::None);
    }

    #[test]
    fn typing_in_the_palette_and_enter_navigates() {
        let mut app = app();
        let mut view = MainView::new();
        view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        for c in "restock".chars() {
            view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        let effects = view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        app.apply_effects(effects);
        assert_eq!(app.router.current_path(), "/new/restocked");
        assert_eq!(app.controller.active_overlay(), Overlay::None);
    }

    #[test]
    fn clicking_a_mega_link_navigates_and_closes_the_panel() {
        let mut app = app();
        let mut view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        draw(&mut view, &mut app, &mut terminal);

        click(&mut view, &mut app, NodeId::MegaTrigger(1));
        assert_eq!(app.controller.open_mega_index(), Some(1));
        draw(&mut view, &mut app, &mut terminal);

        let link = NodeId::MegaLink(evoque_nav::MegaItemRef::new(1, 0, 1));
        let effects = click(&mut view, &mut app, link);
        app.apply_effects(effects);
        assert_eq!(app.router.current_path(), "/collections/best-sellers");
        assert_eq!(app.controller.open_mega_index(), None);
    }

    #[test]
    fn clicking_outside_the_panel_closes_it() {
        let mut app = app();
        let mut view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        draw(&mut view, &mut app, &mut terminal);
        app.controller.open_mega(2);
        draw(&mut view, &mut app, &mut terminal);

        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 139,
            row: 38,
            modifiers: KeyModifiers::NONE,
        };
        view.handle_mouse_events(&mut app, event);
        assert_eq!(app.controller.open_mega_index(), None);
    }

    #[test]
    fn compact_layout_opens_the_drawer_from_the_toggle() {
        let mut app = app();
        let mut view = MainView::new();
        view.handle_message(&mut app, Msg::Resize(60, 30));
        assert_eq!(app.controller.layout(), HeaderLayout::Compact);
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        draw(&mut view, &mut app, &mut terminal);

        click(&mut view, &mut app, NodeId::DrawerToggle);
        assert_eq!(app.controller.active_overlay(), Overlay::MobileDrawer);
        draw(&mut view, &mut app, &mut terminal);
        assert_eq!(app.hit_map.node_at(59, 29), NodeId::DrawerBackdrop);

        click_at(&mut view, &mut app, 59, 20);
        assert_eq!(app.controller.active_overlay(), Overlay::None);
    }

    #[test]
    fn ctrl_t_toggles_the_theme() {
        let mut app = app();
        let mut view = MainView::new();
        view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(app.theme_mode(), ThemeMode::Dark);
        assert_eq!(app.controller.active_overlay(), Overlay::None);
    }
}
