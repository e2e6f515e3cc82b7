//! State of the home page price cards.
//!
//! Each card fetches its own series once. A failed fetch leaves the card in
//! [`WidgetState::Failed`] with the error text; nothing is retried until the
//! user explicitly refreshes.

use std::sync::Arc;

use evoque_api::{ChartRequest, MarketChart, MarketDataSource};
use futures_util::{FutureExt, future::BoxFuture};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Loading,
    Ready(MarketChart),
    Failed(String),
    /// Fetching is disabled for this session.
    Offline,
}

#[derive(Debug, Clone)]
pub struct MarketWidget {
    pub symbol: &'static str,
    pub title: &'static str,
    pub request: ChartRequest,
    pub state: WidgetState,
}

impl MarketWidget {
    fn new(symbol: &'static str, title: &'static str, coin: &str, days: u32) -> Self {
        Self {
            symbol,
            title,
            request: ChartRequest::new(coin, "usd", days),
            state: WidgetState::Loading,
        }
    }

    /// Window label shown under the title, e.g. `24h` or `7d`.
    pub fn window_label(&self) -> String {
        match self.request.days {
            1 => "24h".to_string(),
            days => format!("{days}d"),
        }
    }
}

/// Result of one background fetch, delivered back to the event loop.
/// A spawned fetch, resolved with the coin it was started for.
pub type PendingFetch = BoxFuture<'static, MarketOutcome>;

#[derive(Debug)]
pub struct MarketOutcome {
    pub coin: String,
    pub result: Result<MarketChart, String>,
}

#[derive(Debug, Clone)]
pub struct MarketBoard {
    widgets: Vec<MarketWidget>,
}

impl MarketBoard {
    /// Bitcoin over a day, Ethereum and XRP over a week, all quoted in USD.
    pub fn storefront() -> Self {
        Self {
            widgets: vec![
                MarketWidget::new("₿", "Bitcoin", "bitcoin", 1),
                MarketWidget::new("Ξ", "ETH", "ethereum", 7),
                MarketWidget::new("✕", "XRP", "ripple", 7),
            ],
        }
    }

    pub fn widgets(&self) -> &[MarketWidget] {
        &self.widgets
    }

    pub fn is_loading(&self) -> bool {
        self.widgets.iter().any(|widget| widget.state == WidgetState::Loading)
    }

    pub fn mark_offline(&mut self) {
        for widget in &mut self.widgets {
            widget.state = WidgetState::Offline;
        }
    }

    /// Marks every card failed with the same reason, e.g. when no client
    /// could be built.
    pub fn fail_all(&mut self, reason: &str) {
        for widget in &mut self.widgets {
            widget.state = WidgetState::Failed(reason.to_string());
        }
    }

    /// Records a fetch result. Returns `false` for an unknown coin.
    pub fn apply(&mut self, outcome: MarketOutcome) -> bool {
        let Some(widget) = self.widgets.iter_mut().find(|widget| widget.request.coin == outcome.coin) else {
            warn!(coin = %outcome.coin, "market result for unknown widget");
            return false;
        };
        widget.state = match outcome.result {
            Ok(chart) => WidgetState::Ready(chart),
            Err(message) => WidgetState::Failed(message),
        };
        true
    }

    /// Puts every card back into `Loading` and spawns one fetch per card.
    ///
    /// Each returned future resolves to its card's outcome even when the
    /// task panics or is cancelled, so no card is left loading.
    pub fn spawn_fetches(&mut self, source: Arc<dyn MarketDataSource>) -> Vec<PendingFetch> {
        self.widgets
            .iter_mut()
            .map(|widget| {
                widget.state = WidgetState::Loading;
                let request = widget.request.clone();
                let coin = request.coin.clone();
                let source = Arc::clone(&source);
                debug!(coin = %request.coin, days = request.days, "spawning market fetch");
                let handle = tokio::spawn(async move {
                    let result = source.market_chart(&request).await.map_err(|error| {
                        warn!(coin = %request.coin, %error, "market fetch failed");
                        error.to_string()
                    });
                    MarketOutcome {
                        coin: request.coin,
                        result,
                    }
                });
                async move {
                    handle.await.unwrap_or_else(|error| {
                        warn!(%coin, %error, "market fetch task failed");
                        MarketOutcome {
                            coin,
                            result: Err(format!("market fetch task failed: {error}")),
                        }
                    })
                }
                .boxed()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evoque_api::{MarketError, PricePoint};

    #[derive(Default)]
    struct FixedSource {
        panic_on_ethereum: bool,
    }

    #[async_trait::async_trait]
    impl MarketDataSource for FixedSource {
        async fn market_chart(&self, request: &ChartRequest) -> Result<MarketChart, MarketError> {
            if request.coin == "ethereum" && self.panic_on_ethereum {
                panic!("chart decoder blew up");
            }
            if request.coin == "ripple" {
                return Err(MarketError::MissingPrices {
                    coin: request.coin.clone(),
                });
            }
            Ok(MarketChart::new(
                request.coin.clone(),
                vec![
                    PricePoint {
                        timestamp_ms: 0,
                        price: 1.0,
                    },
                    PricePoint {
                        timestamp_ms: 1,
                        price: 2.0,
                    },
                ],
            ))
        }
    }

    #[test]
    fn storefront_board_requests_the_expected_windows() {
        let board = MarketBoard::storefront();
        let requests: Vec<(&str, u32)> = board
            .widgets()
            .iter()
            .map(|widget| (widget.request.coin.as_str(), widget.request.days))
            .collect();
        assert_eq!(requests, vec![("bitcoin", 1), ("ethereum", 7), ("ripple", 7)]);
        assert_eq!(board.widgets()[0].window_label(), "24h");
        assert_eq!(board.widgets()[1].window_label(), "7d");
        assert!(board.is_loading());
    }

    #[test]
    fn apply_ignores_unknown_coins() {
        let mut board = MarketBoard::storefront();
        let outcome = MarketOutcome {
            coin: "dogecoin".to_string(),
            result: Err("nope".to_string()),
        };
        assert!(!board.apply(outcome));
        board.mark_offline();
        assert!(!board.is_loading());
    }

    #[tokio::test]
    async fn fetch_failures_stay_inside_their_widget() {
        let mut board = MarketBoard::storefront();
        let handles = board.spawn_fetches(Arc::new(FixedSource::default()));
        for handle in handles {
            board.apply(handle.await);
        }
        let states: Vec<&WidgetState> = board.widgets().iter().map(|widget| &widget.state).collect();
        assert!(matches!(states[0], WidgetState::Ready(chart) if chart.last_price() == Some(2.0)));
        assert!(matches!(states[1], WidgetState::Ready(_)));
        assert!(matches!(states[2], WidgetState::Failed(message) if message.contains("ripple")));
        assert!(!board.is_loading());
    }

    #[tokio::test]
    async fn a_panicking_fetch_fails_only_its_own_card() {
        let mut board = MarketBoard::storefront();
        let fetches = board.spawn_fetches(Arc::new(FixedSource { panic_on_ethereum: true }));
        let mut pending: futures_util::stream::FuturesUnordered<PendingFetch> = fetches.into_iter().collect();
        while let Some(outcome) = futures_util::StreamExt::next(&mut pending).await {
            board.apply(outcome);
        }
        let states: Vec<&WidgetState> = board.widgets().iter().map(|widget| &widget.state).collect();
        assert!(matches!(states[0], WidgetState::Ready(_)));
        assert!(matches!(states[1], WidgetState::Failed(message) if message.contains("task failed")));
        assert!(matches!(states[2], WidgetState::Failed(message) if message.contains("ripple")));
        assert!(!board.is_loading());
    }
}
