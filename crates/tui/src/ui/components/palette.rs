//! Command palette modal: a query line above the filtered link results.

use evoque_nav::NodeId;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::component::Component;
use crate::app::App;
use crate::ui::theme::{Theme, theme_helpers as th};
use crate::ui::utils::{centered_rect, display_width, truncate_to_width};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 8;

#[derive(Debug, Default)]
pub struct PaletteComponent {
    scroll: usize,
}

impl PaletteComponent {
    fn panel_area(rect: Rect) -> Rect {
        let mut area = centered_rect(60, 60, rect);
        if area.width < MIN_WIDTH {
            area.width = MIN_WIDTH.min(rect.width);
            area.x = rect.x + (rect.width - area.width) / 2;
        }
        if area.height < MIN_HEIGHT {
            area.height = MIN_HEIGHT.min(rect.height);
            area.y = rect.y + (rect.height - area.height) / 2;
        }
        area
    }

    fn scroll_to(&mut self, active: usize, visible: usize, total: usize) -> usize {
        if active < self.scroll {
            self.scroll = active;
        } else if visible > 0 && active >= self.scroll + visible {
            self.scroll = active + 1 - visible;
        }
        self.scroll = self.scroll.min(total.saturating_sub(visible));
        self.scroll
    }
}

impl Component for PaletteComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        if !app.controller.palette().is_open() {
            self.scroll = 0;
            return;
        }
        app.hit_map.push(rect, NodeId::PaletteBackdrop);
        let panel = Self::panel_area(rect);
        let theme = &*app.theme;
        let block = th::block(theme, Some("Search"), true);
        let inner = block.inner(panel);
        frame.render_widget(Clear, panel);
        frame.render_widget(block, panel);
        app.hit_map.push(panel, NodeId::PalettePanel);
        if inner.height < 3 {
            return;
        }

        // Query line.
        let palette = app.controller.palette();
        let input_area = Rect::new(inner.x, inner.y, inner.width, 1);
        let prompt = "⌕ ";
        let query = palette.query();
        let input_line = if query.is_empty() {
            Line::from(vec![
                Span::styled(prompt, theme.accent_primary_style()),
                Span::styled("Search links…", theme.text_muted_style()),
            ])
        } else {
            Line::from(vec![
                Span::styled(prompt, theme.accent_primary_style()),
                Span::styled(query.to_string(), th::input_style(theme, true)),
            ])
        };
        frame.render_widget(Paragraph::new(input_line), input_area);
        if app.controller.focused() == Some(NodeId::PaletteInput) {
            let input = palette.input();
            let before_cursor = input.text().get(..input.cursor()).unwrap_or(query);
            let x = input_area.x + display_width(prompt) + display_width(before_cursor);
            frame.set_cursor_position(Position::new(x.min(input_area.right().saturating_sub(1)), input_area.y));
        }

        let divider_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        frame.render_widget(
            ratatui::widgets::Block::default()
                .borders(Borders::TOP)
                .border_style(theme.border_style(false)),
            divider_area,
        );

        let list_area = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);
        let results = palette.results().to_vec();
        let active = palette.active_index();
        app.hit_map.push(input_area, NodeId::PaletteInput);

        if results.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No results", app.theme.text_muted_style())),
                Rect::new(list_area.x + 1, list_area.y, list_area.width.saturating_sub(1), 1),
            );
            return;
        }

        let visible = usize::from(list_area.height);
        let offset = self.scroll_to(active, visible, results.len());
        for (index, link) in results.iter().enumerate().skip(offset).take(visible) {
            let area = Rect::new(list_area.x, list_area.y + (index - offset) as u16, list_area.width, 1);
            let is_active = index == active;
            let theme = &*app.theme;
            let row_style = if is_active { theme.selection_style() } else { th::panel_style(theme) };
            let href_width = (link.href.width() as u16).min(area.width / 2);
            let label_width = area.width.saturating_sub(href_width + 3);
            let label = truncate_to_width(&link.label, label_width);
            let padding = area.width.saturating_sub(display_width(&label) + href_width + 2);
            let href_style = if is_active {
                row_style.add_modifier(Modifier::ITALIC)
            } else {
                theme.text_muted_style()
            };
            let line = Line::from(vec![
                Span::raw(" "),
                Span::styled(label, row_style.add_modifier(Modifier::BOLD)),
                Span::raw(" ".repeat(usize::from(padding))),
                Span::styled(truncate_to_width(&link.href, href_width), href_style),
                Span::raw(" "),
            ]);
            frame.render_widget(Paragraph::new(line).style(row_style), area);
            app.hit_map.push(area, NodeId::PaletteResult(index));
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(
            &*app.theme,
            &[("↑↓", " Select  "), ("Enter", " Open  "), ("Ctrl+U", " Clear  "), ("Esc", " Close")],
        )
    }
}
