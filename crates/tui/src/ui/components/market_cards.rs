//! Price cards: title, sparkline, last price and change over the window.

use evoque_api::format_change;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Sparkline},
};

use super::component::Component;
use crate::app::App;
use crate::market::{MarketWidget, WidgetState};
use crate::ui::theme::{Theme, theme_helpers as th};
use crate::ui::utils::truncate_to_width;

/// Cards are laid side by side when each gets at least this many columns.
const MIN_CARD_WIDTH: u16 = 26;

#[derive(Debug, Default)]
pub struct MarketCardsComponent;

/// `$42,000.50`; prices under one dollar keep four decimals.
pub fn format_price(price: f64) -> String {
    if price.abs() < 1.0 {
        return format!("${price:.4}");
    }
    let fixed = format!("{:.2}", price.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if price < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

impl MarketCardsComponent {
    fn render_card(frame: &mut Frame, area: Rect, widget: &MarketWidget, theme: &dyn Theme) {
        let title = format!("{} {} · {}", widget.symbol, widget.title, widget.window_label());
        let block = th::block(theme, None, false).title(Span::styled(
            title,
            theme.text_secondary_style().add_modifier(Modifier::BOLD),
        ));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }
        let [chart_area, footer_area] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        match &widget.state {
            WidgetState::Ready(chart) => {
                let values = chart.normalized(usize::from(chart_area.width));
                frame.render_widget(
                    Sparkline::default()
                        .data(&values)
                        .max(100)
                        .style(Style::default().fg(theme.roles().chart)),
                    chart_area,
                );
                let price = chart.last_price().map(format_price).unwrap_or_else(|| "–".to_string());
                let mut spans = vec![Span::styled(price, theme.text_primary_style().add_modifier(Modifier::BOLD))];
                if let Some(change) = chart.change_pct() {
                    let up = change >= 0.0;
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        format!("{} {}", format_change(change), if up { "↗" } else { "↘" }),
                        theme.change_style(up),
                    ));
                }
                frame.render_widget(Paragraph::new(Line::from(spans)), footer_area);
            }
            WidgetState::Loading => {
                frame.render_widget(Paragraph::new(Span::styled("Loading…", theme.text_muted_style())), chart_area);
            }
            WidgetState::Offline => {
                frame.render_widget(Paragraph::new(Span::styled("Offline", theme.text_muted_style())), chart_area);
            }
            WidgetState::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(vec![
                        Line::from(Span::styled("Failed to load", theme.status_error())),
                        Line::from(Span::styled(
                            truncate_to_width(message, chart_area.width),
                            theme.text_muted_style(),
                        )),
                    ]),
                    chart_area,
                );
            }
        }
    }
}

impl Component for MarketCardsComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let widgets = app.market.widgets();
        if widgets.is_empty() {
            return;
        }
        let count = widgets.len() as u16;
        let areas = if rect.width / count >= MIN_CARD_WIDTH {
            Layout::horizontal(vec![Constraint::Ratio(1, u32::from(count)); widgets.len()]).split(rect)
        } else {
            Layout::vertical(vec![Constraint::Ratio(1, u32::from(count)); widgets.len()]).split(rect)
        };
        for (widget, area) in widgets.iter().zip(areas.iter()) {
            Self::render_card(frame, *area, widget, &*app.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TuiOptions;
    use crate::market::MarketOutcome;
    use evoque_api::{MarketChart, PricePoint};
    use evoque_types::{NavData, ThemeMode};
    use evoque_util::UserPreferences;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(format_price(42000.5), "$42,000.50");
        assert_eq!(format_price(1234567.891), "$1,234,567.89");
        assert_eq!(format_price(999.0), "$999.00");
        assert_eq!(format_price(0.52341), "$0.5234");
    }

    #[test]
    fn cards_show_price_change_and_failures() {
        let mut options = TuiOptions::new(NavData::storefront());
        options.theme = Some(ThemeMode::Light);
        let mut app = App::new(options, Arc::new(UserPreferences::ephemeral()));
        let points = [200.0, 150.0, 213.5]
            .iter()
            .enumerate()
            .map(|(index, price)| PricePoint {
                timestamp_ms: index as i64,
                price: *price,
            })
            .collect();
        app.market.apply(MarketOutcome {
            coin: "bitcoin".to_string(),
            result: Ok(MarketChart::new("bitcoin", points)),
        });
        app.market.apply(MarketOutcome {
            coin: "ripple".to_string(),
            result: Err("market API responded with 503".to_string()),
        });

        let mut terminal = Terminal::new(TestBackend::new(120, 10)).unwrap();
        let mut cards = MarketCardsComponent;
        terminal.draw(|frame| cards.render(frame, frame.area(), &mut app)).unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect();

        assert!(text.contains("$213.50"));
        assert!(text.contains("+6.75%"));
        assert!(text.contains("Loading…"));
        assert!(text.contains("Failed to load"));
    }
}
