//! Storefront header: brand, menubar and utility links.
//!
//! In the wide layout the menubar shows every trigger in registry order
//! (primary links, then mega-menu triggers). RTL documents lay the row out
//! from the right edge, which is why the controller swaps the arrow keys.
//! The compact layout replaces the menubar with the drawer toggle.

use evoque_nav::{HeaderLayout, NodeId, Router};
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::component::Component;
use crate::app::App;
use crate::ui::theme::{Theme, theme_helpers as th};
use crate::ui::utils::display_width;

const ITEM_GAP: u16 = 1;

#[derive(Debug, Default)]
pub struct HeaderComponent;

/// One clickable header entry.
struct HeaderItem {
    node: NodeId,
    label: String,
    highlighted: bool,
}

impl HeaderComponent {
    fn menubar_items(app: &App) -> Vec<HeaderItem> {
        let controller = &app.controller;
        let data = controller.data();
        let path = app.router.current_path();
        controller
            .menubar()
            .triggers()
            .iter()
            .filter_map(|node| match *node {
                NodeId::PrimaryLink(index) => data.primary.get(index).map(|link| HeaderItem {
                    node: *node,
                    label: link.label.clone(),
                    highlighted: controller.is_active_primary(index, path),
                }),
                NodeId::MegaTrigger(index) => data.mega.get(index).map(|group| {
                    let open = controller.mega().is_open(index);
                    HeaderItem {
                        node: *node,
                        label: format!("{} {}", group.trigger, if open { "▴" } else { "▾" }),
                        highlighted: open || group.links().any(|link| link.href == path),
                    }
                }),
                _ => None,
            })
            .collect()
    }

    fn utility_items(app: &App) -> Vec<HeaderItem> {
        let path = app.router.current_path();
        vec![
            HeaderItem {
                node: NodeId::Cart,
                label: "Cart".to_string(),
                highlighted: path == "/cart",
            },
            HeaderItem {
                node: NodeId::Account,
                label: "Account".to_string(),
                highlighted: false,
            },
        ]
    }

    /// Draws `items` starting at `x`, left to right, or leftwards from `x`
    /// when `from_right` is set. Returns the x just past the last item.
    fn place(frame: &mut Frame, app: &mut App, row: Rect, items: &[HeaderItem], mut x: u16, from_right: bool) -> u16 {
        let focused = app.controller.focused();
        for item in items {
            let width = display_width(&item.label) + 2;
            let fits = if from_right {
                x >= row.x + width
            } else {
                x + width <= row.right()
            };
            if !fits {
                break;
            }
            let left = if from_right { x - width } else { x };
            let area = Rect::new(left, row.y, width, 1);
            let style = app.theme.nav_item_style(focused == Some(item.node), item.highlighted);
            frame.render_widget(Paragraph::new(format!(" {} ", item.label)).style(style), area);
            app.hit_map.push(area, item.node);
            x = if from_right {
                left.saturating_sub(ITEM_GAP)
            } else {
                left + width + ITEM_GAP
            };
        }
        x
    }
}

impl Component for HeaderComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.border_style(false))
            .style(th::background_style(theme));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        if inner.height == 0 {
            return;
        }
        let row = Rect::new(inner.x, inner.y + inner.height.saturating_sub(1) / 2, inner.width, 1);
        let rtl = app.controller.direction().is_rtl();
        let focused = app.controller.focused();

        // Utility links hug the trailing edge.
        let mut utilities = Self::utility_items(app);
        utilities.reverse();
        let trailing_end = if rtl {
            Self::place(frame, app, row, &utilities, row.x, false)
        } else {
            Self::place(frame, app, row, &utilities, row.right(), true)
        };

        let brand = app.controller.data().brand.clone();
        let brand_item = HeaderItem {
            node: NodeId::Brand,
            label: brand,
            highlighted: false,
        };
        let mut leading = Vec::with_capacity(8);
        if app.controller.layout() == HeaderLayout::Compact {
            leading.push(HeaderItem {
                node: NodeId::DrawerToggle,
                label: "☰ Menu".to_string(),
                highlighted: app.controller.drawer().is_open(),
            });
        }
        leading.push(brand_item);
        if app.controller.layout() == HeaderLayout::Wide {
            leading.extend(Self::menubar_items(app));
        }

        // Keep the leading row out of the utility area.
        let available = if rtl {
            Rect::new(trailing_end, row.y, row.right().saturating_sub(trailing_end), 1)
        } else {
            Rect::new(row.x, row.y, trailing_end.saturating_sub(row.x), 1)
        };
        if rtl {
            Self::place(frame, app, available, &leading, available.right(), true);
        } else {
            Self::place(frame, app, available, &leading, available.x, false);
        }

        // Brand keeps its weight even when it is not focused.
        if focused != Some(NodeId::Brand)
            && let Some(area) = app.hit_map.area_of(NodeId::Brand)
        {
            let label = app.controller.data().brand.clone();
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {label} "),
                    app.theme.accent_emphasis_style().add_modifier(Modifier::BOLD),
                ))),
                area,
            );
        }
    }
}
