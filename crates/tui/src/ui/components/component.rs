//! Component system for the storefront TUI.
//!
//! Components render one area of the screen from [`App`] state and register
//! the nodes they draw in [`App::hit_map`]. Only the root view receives raw
//! input; it translates and forwards it to the navigation controller, so the
//! input hooks below default to doing nothing.

use crossterm::event::{KeyEvent, MouseEvent};
use evoque_types::Effect;
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

pub(crate) trait Component {
    /// Returns navigation effects for the runtime to apply.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Key hints shown in the bottom bar while this component is in charge.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }

    /// Draw into `rect`. Implementations must register every interactive
    /// node they draw so pointer input can find it.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
