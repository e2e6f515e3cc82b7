//! Mobile drawer: a modal side sheet listing the whole navigation tree.
//!
//! The sheet slides in from the leading edge (right in RTL). Rows scroll so
//! the focused row stays visible; the focus trap itself lives in the
//! controller.

use evoque_nav::{DrawerEntry, NodeId, Router};
use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use super::component::Component;
use crate::app::App;
use crate::ui::theme::{Theme, theme_helpers as th};
use crate::ui::utils::truncate_to_width;

const SHEET_WIDTH: u16 = 38;

#[derive(Debug, Default)]
pub struct DrawerComponent {
    scroll: usize,
}

impl DrawerComponent {
    /// Adjusts the scroll offset so row `focused` is inside a window of
    /// `visible` rows.
    fn scroll_to(&mut self, focused: Option<usize>, visible: usize, total: usize) -> usize {
        let max_offset = total.saturating_sub(visible);
        if let Some(row) = focused {
            if row < self.scroll {
                self.scroll = row;
            } else if visible > 0 && row >= self.scroll + visible {
                self.scroll = row + 1 - visible;
            }
        }
        self.scroll = self.scroll.min(max_offset);
        self.scroll
    }

    fn sheet_area(rect: Rect, rtl: bool) -> Rect {
        let width = SHEET_WIDTH.min(rect.width);
        let x = if rtl { rect.right() - width } else { rect.x };
        Rect::new(x, rect.y, width, rect.height)
    }
}

impl Component for DrawerComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        if !app.controller.drawer().is_open() {
            self.scroll = 0;
            return;
        }
        app.hit_map.push(rect, NodeId::DrawerBackdrop);

        let sheet = Self::sheet_area(rect, app.controller.direction().is_rtl());
        let data = std::sync::Arc::clone(app.controller.data());
        let entries = app.controller.drawer().view(&data).entries();
        let focused = app.controller.focused();
        let current_path = app.router.current_path().to_string();

        let theme = &*app.theme;
        let block = th::block(theme, Some(data.brand.as_str()), true);
        let inner = block.inner(sheet);
        frame.render_widget(Clear, sheet);
        frame.render_widget(block, sheet);
        app.hit_map.push(sheet, NodeId::DrawerPanel);

        let visible = usize::from(inner.height);
        let focused_row = entries.iter().position(|entry| entry.node().is_some() && entry.node() == focused);
        let offset = self.scroll_to(focused_row, visible, entries.len());

        for (row, entry) in entries.iter().enumerate().skip(offset).take(visible) {
            let y = inner.y + (row - offset) as u16;
            let area = Rect::new(inner.x, y, inner.width, 1);
            let is_focused = entry.node().is_some() && entry.node() == focused;
            let theme = &*app.theme;
            let line = match entry {
                DrawerEntry::Close => Line::from(Span::styled("✕ Close", theme.nav_item_style(is_focused, false))),
                DrawerEntry::Heading(text) => Line::from(Span::styled(
                    text.to_uppercase(),
                    theme.text_secondary_style().add_modifier(Modifier::BOLD),
                )),
                DrawerEntry::GroupToggle { trigger, expanded, .. } => Line::from(Span::styled(
                    format!("{} {trigger}", if *expanded { "▾" } else { "▸" }),
                    theme.nav_item_style(is_focused, false).add_modifier(Modifier::BOLD),
                )),
                DrawerEntry::SectionLabel(text) => Line::from(Span::styled(format!("  {text}"), theme.text_muted_style())),
                DrawerEntry::Link { node, link } => {
                    let indent = if matches!(node, NodeId::DrawerLink(evoque_nav::DrawerLinkRef::Mega(_))) { "    " } else { "  " };
                    let label = truncate_to_width(&link.label, inner.width.saturating_sub(indent.len() as u16));
                    let style = theme.nav_item_style(is_focused, link.href == current_path);
                    Line::from(vec![Span::raw(indent), Span::styled(label, style)])
                }
            };
            frame.render_widget(Paragraph::new(line), area);
            if let Some(node) = entry.node() {
                app.hit_map.push(area, node);
            }
        }

        if entries.len() > visible {
            let mut state = ScrollbarState::new(entries.len().saturating_sub(visible)).position(offset);
            let roles = app.theme.roles();
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .track_style(ratatui::style::Style::default().fg(roles.scrollbar_track))
                    .thumb_style(ratatui::style::Style::default().fg(roles.scrollbar_thumb)),
                sheet.inner(Margin::new(0, 1)),
                &mut state,
            );
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(
            &*app.theme,
            &[
                ("Tab", " Next  "),
                ("Shift+Tab", " Previous  "),
                ("Enter", " Open  "),
                ("Esc", " Close"),
            ],
        )
    }
}
