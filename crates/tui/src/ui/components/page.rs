//! Page area: the home page with the featured product and price cards, or a
//! placeholder page for whatever route the router is on.

use evoque_nav::Router;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::component::Component;
use super::market_cards::MarketCardsComponent;
use crate::app::App;
use crate::ui::theme::{Theme, theme_helpers as th};

#[derive(Debug, Default)]
pub struct PageComponent {
    cards: MarketCardsComponent,
}

/// What the page area shows for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    Home,
    Link {
        title: String,
        href: String,
        description: Option<String>,
    },
    Cart,
    NotFound(String),
}

impl PageContent {
    pub fn for_path(app: &App, path: &str) -> Self {
        if path == "/" {
            return PageContent::Home;
        }
        if path == "/cart" {
            return PageContent::Cart;
        }
        match app.controller.data().find_by_href(path) {
            Some(link) => PageContent::Link {
                title: link.label.clone(),
                href: link.href.clone(),
                description: link.description.clone(),
            },
            None => PageContent::NotFound(path.to_string()),
        }
    }
}

impl PageComponent {
    fn render_home(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let [hero_area, cards_area] = Layout::vertical([Constraint::Length(7), Constraint::Min(6)]).areas(rect);
        let theme = &*app.theme;
        let block = th::block(theme, Some("New Arrival · Limited"), false);
        let hero = Paragraph::new(vec![
            Line::from(Span::styled(
                "Retro Linen Overshirt",
                theme.text_primary_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Lightweight, breathable, and cut with a relaxed silhouette.",
                theme.text_secondary_style(),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("$129", theme.accent_emphasis_style()),
                Span::styled("  In stock · Free shipping over $100", theme.text_muted_style()),
            ]),
        ])
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(hero, hero_area);
        self.cards.render(frame, cards_area, app);
    }

    fn render_article(frame: &mut Frame, rect: Rect, theme: &dyn Theme, content: &PageContent) {
        let mut lines = Vec::new();
        match content {
            PageContent::Link {
                title,
                href,
                description,
            } => {
                lines.push(Line::from(vec![
                    Span::styled("Home / ", theme.text_muted_style()),
                    Span::styled(title.clone(), theme.text_secondary_style()),
                ]));
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    title.clone(),
                    theme.text_primary_style().add_modifier(Modifier::BOLD),
                )));
                if let Some(description) = description {
                    lines.push(Line::from(Span::styled(description.clone(), theme.text_secondary_style())));
                }
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(href.clone(), theme.text_muted_style())));
            }
            PageContent::Cart => {
                lines.push(Line::from(Span::styled(
                    "Your cart",
                    theme.text_primary_style().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled("Your cart is empty.", theme.text_secondary_style())));
            }
            PageContent::NotFound(path) => {
                lines.push(Line::from(Span::styled(
                    "Page not found",
                    theme.status_error().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(path.clone(), theme.text_muted_style())));
            }
            PageContent::Home => {}
        }
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(th::block(theme, None, false)),
            rect,
        );
    }
}

impl Component for PageComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let path = app.router.current_path().to_string();
        match PageContent::for_path(app, &path) {
            PageContent::Home => self.render_home(frame, rect, app),
            content => Self::render_article(frame, rect, &*app.theme, &content),
        }
    }
}
