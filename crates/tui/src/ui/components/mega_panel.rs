//! Floating mega-menu panel anchored under its trigger.
//!
//! Sections are laid out as columns. While the panel is still entering it is
//! drawn with a muted border; the next tick settles it.

use evoque_nav::{MegaItemRef, NodeId, PanelTransition, Router};
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use super::component::Component;
use crate::app::App;
use crate::ui::theme::{Theme, theme_helpers as th};
use crate::ui::utils::{display_width, truncate_to_width};

const MIN_COLUMN_WIDTH: u16 = 18;
const COLUMN_GAP: u16 = 2;

#[derive(Debug, Default)]
pub struct MegaPanelComponent;

impl MegaPanelComponent {
    /// Width wanted by one section column.
    fn column_width(label: &str, items: &[evoque_types::NavLink]) -> u16 {
        items
            .iter()
            .map(|link| display_width(&link.label))
            .chain(std::iter::once(display_width(label)))
            .max()
            .unwrap_or(0)
            .max(MIN_COLUMN_WIDTH)
    }
}

impl Component for MegaPanelComponent {
    /// `rect` is the area below the header the panel may cover.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let Some(index) = app.controller.open_mega_index() else {
            return;
        };
        let data = std::sync::Arc::clone(app.controller.data());
        let Some(group) = data.mega.get(index) else {
            return;
        };

        let columns: Vec<u16> = group
            .sections
            .iter()
            .map(|section| Self::column_width(&section.label, &section.items))
            .collect();
        let rows = group.sections.iter().map(|section| section.items.len()).max().unwrap_or(0) as u16;
        // Borders, section label, items, description line.
        let height = (rows + 4).min(rect.height);
        let width = (columns.iter().sum::<u16>() + COLUMN_GAP * columns.len().saturating_sub(1) as u16 + 4).min(rect.width);
        if width < 4 || height < 3 {
            return;
        }

        let anchor = app.hit_map.area_of(NodeId::MegaTrigger(index));
        let rtl = app.controller.direction().is_rtl();
        let x = match anchor {
            Some(trigger) if rtl => trigger.right().saturating_sub(width).max(rect.x),
            Some(trigger) => trigger.x.min(rect.right().saturating_sub(width)),
            None => rect.x,
        };
        let panel = Rect::new(x, rect.y, width, height);

        let focused = app.controller.focused();
        let focus_inside = focused.is_some_and(|node| node.is_within(NodeId::MegaPanel(index)));
        let settled = app.controller.mega().transition() == PanelTransition::Idle;
        let theme = &*app.theme;
        let mut block = th::block(theme, Some(group.trigger.as_str()), focus_inside);
        if !settled {
            block = block.border_style(theme.text_muted_style());
        }
        let inner = block.inner(panel);
        frame.render_widget(Clear, panel);
        frame.render_widget(block, panel);
        app.hit_map.push(panel, NodeId::MegaPanel(index));

        let mut column_x = inner.x + 1;
        let mut focused_description: Option<&str> = None;
        for (section_index, (section, column_width)) in group.sections.iter().zip(&columns).enumerate() {
            if column_x >= inner.right() {
                break;
            }
            let column_width = (*column_width).min(inner.right() - column_x);
            let theme = &*app.theme;
            frame.render_widget(
                Paragraph::new(Span::styled(
                    truncate_to_width(&section.label, column_width),
                    theme.text_secondary_style().add_modifier(Modifier::BOLD),
                )),
                Rect::new(column_x, inner.y, column_width, 1),
            );
            for (item_index, link) in section.items.iter().enumerate() {
                let y = inner.y + 1 + item_index as u16;
                if y >= inner.bottom().saturating_sub(1) {
                    break;
                }
                let node = NodeId::MegaLink(MegaItemRef::new(index, section_index, item_index));
                let is_focused = focused == Some(node);
                if is_focused {
                    focused_description = link.description.as_deref();
                }
                let is_current = app.router.current_path() == link.href;
                let theme = &*app.theme;
                let style = theme.nav_item_style(is_focused, is_current);
                let area = Rect::new(column_x, y, column_width, 1);
                frame.render_widget(Paragraph::new(truncate_to_width(&link.label, column_width)).style(style), area);
                app.hit_map.push(area, node);
            }
            column_x += column_width + COLUMN_GAP;
        }

        if let Some(description) = focused_description {
            let line_area = Rect::new(inner.x + 1, inner.bottom().saturating_sub(1), inner.width.saturating_sub(2), 1);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    truncate_to_width(description, line_area.width),
                    app.theme.text_muted_style(),
                ))),
                line_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TuiOptions;
    use evoque_types::{NavData, ThemeMode};
    use evoque_util::UserPreferences;
    use ratatui::{Terminal, backend::TestBackend, layout::Position};
    use std::sync::Arc;

    fn app() -> App {
        let mut options = TuiOptions::new(NavData::storefront());
        options.theme = Some(ThemeMode::Dark);
        options.offline = true;
        App::new(options, Arc::new(UserPreferences::ephemeral()))
    }

    #[test]
    fn open_panel_registers_its_links_below_the_trigger() {
        let mut app = app();
        app.controller.open_mega(1);
        app.hit_map.push(Rect::new(20, 1, 14, 1), NodeId::MegaTrigger(1));

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut panel = MegaPanelComponent;
        terminal
            .draw(|frame| panel.render(frame, Rect::new(0, 3, 120, 20), &mut app))
            .unwrap();

        let area = app.hit_map.area_of(NodeId::MegaPanel(1)).unwrap();
        assert_eq!((area.x, area.y), (20, 3));
        let first = NodeId::MegaLink(MegaItemRef::new(1, 0, 0));
        let link = app.hit_map.area_of(first).unwrap();
        assert!(area.contains(Position::new(link.x, link.y)));
        assert_eq!(app.hit_map.node_at(link.x, link.y), first);
    }

    #[test]
    fn closed_panel_draws_nothing() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut panel = MegaPanelComponent;
        terminal.draw(|frame| panel.render(frame, frame.area(), &mut app)).unwrap();
        assert!(app.hit_map.is_empty());
    }
}
