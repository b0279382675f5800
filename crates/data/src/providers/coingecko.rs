//! CoinGecko REST API price feed.

use crate::PriceFeed;
use crate::config::CoinGeckoConfig;
use crate::error::PriceFeedError;
use async_trait::async_trait;
use chrono::DateTime;
use lp_sim_domain::entities::TokenId;
use lp_sim_domain::value_objects::{PricePoint, PriceSeries};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, warn};

const API_KEY_HEADER: &str = "x-cg-demo-api-key";
const MAX_ERROR_BODY: usize = 256;

/// Response of `/simple/price`: `{ "<id>": { "usd": <price> } }`.
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// Response of `/coins/{id}/market_chart`.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    /// `[timestamp_ms, price]` pairs.
    prices: Vec<[f64; 2]>,
}

/// Price feed backed by the CoinGecko API.
#[derive(Debug, Clone)]
pub struct CoinGeckoProvider {
    client: reqwest::Client,
    config: CoinGeckoConfig,
}

impl CoinGeckoProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: CoinGeckoConfig) -> Result<Self, PriceFeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PriceFeedError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(url = %url, "Requesting CoinGecko");

        let mut request = self.client.get(&url).query(query);
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = truncate_chars(&text, MAX_ERROR_BODY);
            warn!(status = status.as_u16(), url = %url, "CoinGecko request rejected");
            return Err(PriceFeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoProvider {
    async fn fetch_spot_price(&self, token: &TokenId) -> Result<f64, PriceFeedError> {
        let response: SimplePriceResponse = self
            .get_json(
                "/simple/price",
                &[
                    ("ids", token.to_string()),
                    ("vs_currencies", "usd".to_string()),
                ],
            )
            .await?;
        parse_simple_price(token, &response)
    }

    async fn fetch_daily_history(
        &self,
        token: &TokenId,
        days: u32,
    ) -> Result<PriceSeries, PriceFeedError> {
        let response: MarketChartResponse = self
            .get_json(
                &format!("/coins/{token}/market_chart"),
                &[
                    ("vs_currency", "usd".to_string()),
                    ("days", days.to_string()),
                    ("interval", "daily".to_string()),
                ],
            )
            .await?;
        let series = parse_market_chart(&response)?;
        debug!(token = %token, days, points = series.len(), "Fetched daily history");
        Ok(series)
    }
}

/// First `max` characters of `text`, never splitting a UTF-8 sequence.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn parse_simple_price(
    token: &TokenId,
    response: &SimplePriceResponse,
) -> Result<f64, PriceFeedError> {
    let price = response
        .get(token.as_str())
        .and_then(|quotes| quotes.get("usd"))
        .copied()
        .ok_or_else(|| PriceFeedError::NotFound(token.clone()))?;
    if !price.is_finite() || price <= 0.0 {
        return Err(PriceFeedError::Decode(format!(
            "non-positive price {price} for {token}"
        )));
    }
    Ok(price)
}

fn parse_market_chart(response: &MarketChartResponse) -> Result<PriceSeries, PriceFeedError> {
    let points = response
        .prices
        .iter()
        .map(|[ts_ms, price]| {
            DateTime::from_timestamp_millis(*ts_ms as i64)
                .map(|ts| PricePoint::new(ts, *price))
                .ok_or_else(|| PriceFeedError::Decode(format!("invalid timestamp {ts_ms}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PriceSeries::from_points(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_price() {
        let body = r#"{"ethereum":{"usd":3201.55}}"#;
        let response: SimplePriceResponse = serde_json::from_str(body).unwrap();
        let token = TokenId::new("ethereum");
        assert_eq!(parse_simple_price(&token, &response).unwrap(), 3201.55);

        let missing = TokenId::new("bitcoin");
        assert!(matches!(
            parse_simple_price(&missing, &response),
            Err(PriceFeedError::NotFound(_))
        ));
    }

    #[test]
    fn test_parse_simple_price_rejects_zero() {
        let response: SimplePriceResponse =
            serde_json::from_str(r#"{"dead":{"usd":0.0}}"#).unwrap();
        assert!(matches!(
            parse_simple_price(&TokenId::new("dead"), &response),
            Err(PriceFeedError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_market_chart_sorts_points() {
        let body = r#"{
            "prices": [[1704153600000, 2400.5], [1704067200000, 2300.0], [1704240000000, 2450.25]],
            "market_caps": [],
            "total_volumes": []
        }"#;
        let response: MarketChartResponse = serde_json::from_str(body).unwrap();
        let series = parse_market_chart(&response).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.prices().collect::<Vec<_>>(),
            vec![2300.0, 2400.5, 2450.25]
        );
    }

    #[test]
    fn test_provider_builds_from_default_config() {
        assert!(CoinGeckoProvider::new(CoinGeckoConfig::default()).is_ok());
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        let text = format!("{}é tail", "a".repeat(255));
        let truncated = truncate_chars(&text, MAX_ERROR_BODY);
        assert_eq!(truncated.chars().count(), MAX_ERROR_BODY);
        assert!(truncated.ends_with('é'));
        assert_eq!(truncate_chars("short", MAX_ERROR_BODY), "short");
    }

    /// Serves one canned HTTP response on a local port and returns its base URL.
    async fn serve_once(status_line: &'static str, body: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_error_status_with_multibyte_body() {
        let body = format!("{}é{}", "a".repeat(255), "ü".repeat(100));
        let base_url = serve_once("503 Service Unavailable", body).await;
        let provider =
            CoinGeckoProvider::new(CoinGeckoConfig::default().with_base_url(base_url)).unwrap();

        let err = provider
            .fetch_spot_price(&TokenId::new("ethereum"))
            .await
            .unwrap_err();
        match err {
            PriceFeedError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body.chars().count(), MAX_ERROR_BODY);
                assert!(body.ends_with('é'));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_spot_price_over_http() {
        let base_url = serve_once("200 OK", r#"{"ethereum":{"usd":3100.5}}"#.to_string()).await;
        let provider =
            CoinGeckoProvider::new(CoinGeckoConfig::default().with_base_url(base_url)).unwrap();

        let price = provider
            .fetch_spot_price(&TokenId::new("ethereum"))
            .await
            .unwrap();
        assert_eq!(price, 3100.5);
    }
}
