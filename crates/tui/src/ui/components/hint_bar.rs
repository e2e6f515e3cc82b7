//! Bottom strip: contextual key hints on the left, route and theme on the
//! right.

use evoque_nav::{HeaderLayout, Router};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::component::Component;
use crate::app::App;
use crate::ui::theme::{Theme, theme_helpers as th};

#[derive(Debug, Default)]
pub struct HintBarComponent {
    /// Hints supplied by the overlay in charge, if any.
    overlay_hints: Option<Vec<Span<'static>>>,
}

impl HintBarComponent {
    pub fn set_overlay_hints(&mut self, hints: Option<Vec<Span<'static>>>) {
        self.overlay_hints = hints;
    }

    fn page_hints(app: &App) -> Vec<Span<'static>> {
        let navigate = match app.controller.layout() {
            HeaderLayout::Wide => ("←→", " Menu  "),
            HeaderLayout::Compact => ("Enter", " Menu  "),
        };
        th::build_hint_spans(
            &*app.theme,
            &[
                ("Ctrl+K", " Search  "),
                ("Tab", " Focus  "),
                navigate,
                ("Alt+←", " Back  "),
                ("Ctrl+T", " Theme  "),
                ("Ctrl+Q", " Quit"),
            ],
        )
    }
}

impl Component for HintBarComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let hints = self.overlay_hints.clone().unwrap_or_else(|| Self::page_hints(app));
        frame.render_widget(Paragraph::new(Line::from(hints)).style(th::background_style(theme)), rect);

        let status = Line::from(vec![
            Span::styled(app.router.current_path().to_string(), theme.accent_primary_style()),
            Span::styled(format!("  {} ", app.theme_mode()), theme.text_muted_style()),
        ]);
        frame.render_widget(Paragraph::new(status).alignment(Alignment::Right), rect);
    }
}
