use crate::core::currency::Currency;
use crate::core::market::{MarketDataProvider, MarketSnapshot};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

const PRICE_CHANGE_WINDOWS: &str = "1h,24h,7d";

#[derive(Deserialize, Debug)]
struct CoinMarket {
    id: String,
    name: String,
    symbol: String,
    image: Option<String>,
    current_price: Option<f64>,
    market_cap: Option<f64>,
    total_volume: Option<f64>,
    high_24h: Option<f64>,
    low_24h: Option<f64>,
    price_change_percentage_1h_in_currency: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    price_change_percentage_7d_in_currency: Option<f64>,
}

impl From<CoinMarket> for MarketSnapshot {
    fn from(market: CoinMarket) -> Self {
        MarketSnapshot {
            id: market.id,
            name: market.name,
            symbol: market.symbol,
            image: market.image.unwrap_or_default(),
            current_price: market.current_price.unwrap_or_default(),
            market_cap: market.market_cap.unwrap_or_default(),
            total_volume: market.total_volume.unwrap_or_default(),
            high_24h: market.high_24h.unwrap_or_default(),
            low_24h: market.low_24h.unwrap_or_default(),
            change_1h: market.price_change_percentage_1h_in_currency.unwrap_or_default(),
            change_24h: market.price_change_percentage_24h.unwrap_or_default(),
            change_7d: market.price_change_percentage_7d_in_currency.unwrap_or_default(),
        }
    }
}

/// Client for the CoinGecko `coins/markets` endpoint.
pub struct CoinGeckoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("coinboard/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(CoinGeckoProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn markets_url(&self, currency: Currency, limit: usize) -> String {
        format!(
            "{}/api/v3/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=false&price_change_percentage={}",
            self.base_url, currency, limit, PRICE_CHANGE_WINDOWS
        )
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    #[instrument(
        name = "CoinGeckoMarketsFetch",
        skip(self),
        fields(currency = %currency)
    )]
    async fn fetch_markets(
        &self,
        currency: Currency,
        limit: usize,
    ) -> Result<Vec<MarketSnapshot>> {
        let url = self.markets_url(currency, limit);
        debug!("Requesting market data from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP error! status: {}", status.as_u16());
        }

        let response_text = response
            .text()
            .await
            .context("Failed to get response text")?;

        let markets: Vec<CoinMarket> = match serde_json::from_str(&response_text) {
            Ok(data) => data,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse market data response"
                );
                return Err(e).context("Failed to parse market data response");
            }
        };

        debug!(count = markets.len(), "Received market data");
        Ok(markets.into_iter().map(MarketSnapshot::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MARKETS_PATH: &str = "/api/v3/coins/markets";

    const MOCK_JSON: &str = r#"[
        {
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.example/bitcoin.png",
            "current_price": 65000.5,
            "market_cap": 1280000000000,
            "total_volume": 32000000000,
            "high_24h": 66000,
            "low_24h": 64000,
            "price_change_percentage_24h": -1.25,
            "price_change_percentage_1h_in_currency": 0.12,
            "price_change_percentage_7d_in_currency": 4.5
        },
        {
            "id": "tether",
            "symbol": "usdt",
            "name": "Tether",
            "image": "https://assets.example/tether.png",
            "current_price": 0.9998,
            "market_cap": 110000000000,
            "total_volume": 50000000000,
            "high_24h": 1.001,
            "low_24h": null,
            "price_change_percentage_24h": null
        }
    ]"#;

    async fn create_mock_server(currency: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(MARKETS_PATH))
            .and(query_param("vs_currency", currency))
            .and(query_param("order", "market_cap_desc"))
            .and(query_param("per_page", "15"))
            .and(query_param("page", "1"))
            .and(query_param("sparkline", "false"))
            .and(query_param("price_change_percentage", "1h,24h,7d"))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(mock_server: &MockServer) -> CoinGeckoProvider {
        CoinGeckoProvider::new(&mock_server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_markets_fetch() {
        let mock_server = create_mock_server(
            "usd",
            ResponseTemplate::new(200).set_body_string(MOCK_JSON),
        )
        .await;

        let markets = provider(&mock_server)
            .fetch_markets(Currency::Usd, 15)
            .await
            .unwrap();

        assert_eq!(markets.len(), 2);
        let bitcoin = &markets[0];
        assert_eq!(bitcoin.id, "bitcoin");
        assert_eq!(bitcoin.name, "Bitcoin");
        assert_eq!(bitcoin.symbol, "btc");
        assert_eq!(bitcoin.current_price, 65000.5);
        assert_eq!(bitcoin.market_cap, 1_280_000_000_000.0);
        assert_eq!(bitcoin.change_1h, 0.12);
        assert_eq!(bitcoin.change_24h, -1.25);
        assert_eq!(bitcoin.change_7d, 4.5);
    }

    #[tokio::test]
    async fn test_missing_change_fields_default_to_zero() {
        let mock_server = create_mock_server(
            "eur",
            ResponseTemplate::new(200).set_body_string(MOCK_JSON),
        )
        .await;

        let markets = provider(&mock_server)
            .fetch_markets(Currency::Eur, 15)
            .await
            .unwrap();

        let tether = &markets[1];
        assert_eq!(tether.current_price, 0.9998);
        assert_eq!(tether.low_24h, 0.0);
        assert_eq!(tether.change_1h, 0.0);
        assert_eq!(tether.change_24h, 0.0);
        assert_eq!(tether.change_7d, 0.0);
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let mock_server = create_mock_server("usd", ResponseTemplate::new(500)).await;

        let result = provider(&mock_server).fetch_markets(Currency::Usd, 15).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("status: 500"), "{err}");
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let mock_server = create_mock_server(
            "brl",
            ResponseTemplate::new(200).set_body_string(r#"{"error": "rate limited"}"#),
        )
        .await;

        let result = provider(&mock_server).fetch_markets(Currency::Brl, 15).await;

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse market data response")
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_reported() {
        let provider =
            CoinGeckoProvider::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let result = provider.fetch_markets(Currency::Usd, 15).await;

        assert!(result.unwrap_err().to_string().contains("Request error"));
    }

    #[test]
    fn test_markets_url() {
        let provider =
            CoinGeckoProvider::new("http://localhost:9000/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            provider.markets_url(Currency::Jpy, 15),
            "http://localhost:9000/api/v3/coins/markets?vs_currency=jpy&order=market_cap_desc&per_page=15&page=1&sparkline=false&price_change_percentage=1h,24h,7d"
        );
    }
}
