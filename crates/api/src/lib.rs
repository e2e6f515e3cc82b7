//! Market-data client for the storefront's price widgets.
//!
//! This crate is a boundary collaborator: the navigation core never touches
//! it. It provides:
//!
//! - [`MarketDataSource`], the async seam the front-end fetches through
//! - [`CoinGeckoClient`], a `reqwest` implementation against the CoinGecko
//!   `market_chart` endpoint
//! - [`MarketChart`], the parsed price series with helpers for the cards
//!
//! Failures are reported as [`MarketError`]; callers show them inside the
//! widget and do not retry.
//!
//! # Example
//!
//! ```ignore
//! use evoque_api::{ChartRequest, CoinGeckoClient, MarketDataSource};
//!
//! async fn latest() -> Result<(), evoque_api::MarketError> {
//!     let client = CoinGeckoClient::from_env()?;
//!     let chart = client.market_chart(&ChartRequest::new("bitcoin", "usd", 1)).await?;
//!     println!("{:?}", chart.last_price());
//!     Ok(())
//! }
//! ```

mod chart;

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header};
use thiserror::Error;
use tracing::{debug, warn};

pub use chart::{MarketChart, PricePoint, format_change};

/// Environment variable overriding the market API base URL.
pub const MARKET_API_BASE_ENV: &str = "EVOQUE_MARKET_API_BASE";

/// Public CoinGecko API.
pub const DEFAULT_MARKET_API_BASE: &str = "https://api.coingecko.com";

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("invalid market API base URL '{base}': {reason}")]
    InvalidBaseUrl { base: String, reason: String },
    #[error("market request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("market API responded with {status} for {coin}")]
    Status { coin: String, status: StatusCode },
    #[error("market response for {coin} has no price series")]
    MissingPrices { coin: String },
    #[error("invalid market payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// One chart query: coin id, quote currency and look-back window in days.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartRequest {
    pub coin: String,
    pub vs_currency: String,
    pub days: u32,
}

impl ChartRequest {
    pub fn new(coin: impl Into<String>, vs_currency: impl Into<String>, days: u32) -> Self {
        Self {
            coin: coin.into(),
            vs_currency: vs_currency.into(),
            days,
        }
    }
}

/// Source of historical price series.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn market_chart(&self, request: &ChartRequest) -> Result<MarketChart, MarketError>;
}

/// Thin wrapper around a configured `reqwest::Client` for the CoinGecko API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    base_url: Url,
    http: Client,
}

impl CoinGeckoClient {
    /// Builds a client for `base`, which must be an absolute http(s) URL.
    pub fn new(base: &str) -> Result<Self, MarketError> {
        let base_url = validate_base_url(base)?;
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        // Prices must never come from an intermediate cache.
        default_headers.insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-cache"));
        let http = Client::builder()
            .default_headers(default_headers)
            .user_agent(format!("evoque-tui/0.1; {}", env::consts::OS))
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { base_url, http })
    }

    /// Builds a client from [`MARKET_API_BASE_ENV`], falling back to the public API.
    pub fn from_env() -> Result<Self, MarketError> {
        let base = env::var(MARKET_API_BASE_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MARKET_API_BASE.to_string());
        Self::new(base.trim())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for `request`.
    pub fn chart_url(&self, request: &ChartRequest) -> Url {
        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base_path}/api/v3/coins/{}/market_chart", request.coin));
        url.query_pairs_mut()
            .clear()
            .append_pair("vs_currency", &request.vs_currency)
            .append_pair("days", &request.days.to_string());
        url
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn market_chart(&self, request: &ChartRequest) -> Result<MarketChart, MarketError> {
        let url = self.chart_url(request);
        debug!(%url, "fetching market chart");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(coin = %request.coin, %status, "market API request failed");
            return Err(MarketError::Status {
                coin: request.coin.clone(),
                status,
            });
        }
        let body = response.text().await?;
        MarketChart::from_json(&request.coin, &body)
    }
}

fn validate_base_url(base: &str) -> Result<Url, MarketError> {
    let url = Url::parse(base).map_err(|error| MarketError::InvalidBaseUrl {
        base: base.to_string(),
        reason: error.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(MarketError::InvalidBaseUrl {
            base: base.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.host_str().is_none() {
        return Err(MarketError::InvalidBaseUrl {
            base: base.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(url)
}
