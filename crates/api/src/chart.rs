//! Parsed `market_chart` responses.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::MarketError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Unix epoch milliseconds.
    pub timestamp_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

#[derive(Debug, Deserialize)]
struct MarketChartPayload {
    prices: Option<Vec<(f64, f64)>>,
}

/// A coin's price series, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketChart {
    coin: String,
    points: Vec<PricePoint>,
}

impl MarketChart {
    pub fn new(coin: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            coin: coin.into(),
            points,
        }
    }

    /// Parses a `market_chart` body. Only the `prices` series is kept; a body
    /// without one is an error.
    pub fn from_json(coin: &str, body: &str) -> Result<Self, MarketError> {
        let payload: MarketChartPayload = serde_json::from_str(body)?;
        let prices = payload.prices.ok_or_else(|| MarketError::MissingPrices { coin: coin.to_string() })?;
        let points = prices
            .into_iter()
            .map(|(timestamp, price)| PricePoint {
                timestamp_ms: timestamp as i64,
                price,
            })
            .collect();
        Ok(Self::new(coin, points))
    }

    pub fn coin(&self) -> &str {
        &self.coin
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_price(&self) -> Option<f64> {
        self.points.first().map(|point| point.price)
    }

    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|point| point.price)
    }

    /// Percent change from the first to the last point of the window.
    pub fn change_pct(&self) -> Option<f64> {
        let first = self.first_price()?;
        let last = self.last_price()?;
        if self.points.len() < 2 || first == 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }

    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|point| point.price).fold(None, |range, price| match range {
            None => Some((price, price)),
            Some((low, high)) => Some((low.min(price), high.max(price))),
        })
    }

    /// Averages the series into at most `buckets` values scaled to `0..=100`,
    /// suitable for a terminal sparkline.
    pub fn normalized(&self, buckets: usize) -> Vec<u64> {
        if buckets == 0 || self.points.is_empty() {
            return Vec::new();
        }
        let chunk = self.points.len().div_ceil(buckets);
        let averages: Vec<f64> = self
            .points
            .chunks(chunk)
            .map(|points| points.iter().map(|point| point.price).sum::<f64>() / points.len() as f64)
            .collect();
        let low = averages.iter().copied().fold(f64::INFINITY, f64::min);
        let high = averages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = high - low;
        averages
            .into_iter()
            .map(|value| if span > 0.0 { ((value - low) / span * 100.0).round() as u64 } else { 50 })
            .collect()
    }
}

/// Formats a signed percentage the way the price cards show it, e.g. `+6.75%`.
pub fn format_change(change_pct: f64) -> String {
    let sign = if change_pct >= 0.0 { "+" } else { "" };
    format!("{sign}{change_pct:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(prices: &[f64]) -> MarketChart {
        let points = prices
            .iter()
            .enumerate()
            .map(|(index, price)| PricePoint {
                timestamp_ms: 1_700_000_000_000 + index as i64 * 60_000,
                price: *price,
            })
            .collect();
        MarketChart::new("bitcoin", points)
    }

    #[test]
    fn parses_prices_and_ignores_other_series() {
        let body = r#"{"prices":[[1700000000000,42000.5],[1700003600000,42100.0]],"market_caps":[[1,2]]}"#;
        let chart = MarketChart::from_json("bitcoin", body).unwrap();
        assert_eq!(chart.points().len(), 2);
        assert_eq!(chart.first_price(), Some(42000.5));
        assert_eq!(
            chart.points()[0].time().map(|time| time.to_rfc3339()),
            Some("2023-11-14T22:13:20+00:00".to_string())
        );
    }

    #[test]
    fn missing_prices_is_an_error() {
        let error = MarketChart::from_json("ripple", r#"{"error":"coin not found"}"#).unwrap_err();
        assert!(matches!(error, MarketError::MissingPrices { ref coin } if coin == "ripple"));
        assert!(matches!(MarketChart::from_json("ripple", "<html>"), Err(MarketError::Payload(_))));
    }

    #[test]
    fn change_pct_compares_first_and_last() {
        let change = chart(&[200.0, 150.0, 213.5]).change_pct().unwrap();
        assert!((change - 6.75).abs() < 1e-9);
        assert_eq!(format_change(change), "+6.75%");
        assert_eq!(format_change(-1.234), "-1.23%");
        assert_eq!(chart(&[10.0]).change_pct(), None);
        assert_eq!(chart(&[0.0, 5.0]).change_pct(), None);
    }

    #[test]
    fn normalized_downsamples_and_scales() {
        let values = chart(&[1.0, 3.0, 5.0, 7.0, 9.0, 11.0]).normalized(3);
        assert_eq!(values, vec![0, 50, 100]);
        assert_eq!(chart(&[4.0, 4.0]).normalized(10), vec![50, 50]);
        assert!(chart(&[]).normalized(5).is_empty());
        assert_eq!(chart(&[2.0, 8.0, 5.0]).price_range(), Some((2.0, 8.0)));
    }
}
