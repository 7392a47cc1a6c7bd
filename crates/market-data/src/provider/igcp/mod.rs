//! IGCP simulator provider for Certificados de Aforro.
//!
//! IGCP (the Portuguese treasury agency) exposes the value simulator used on
//! its website as a JSON endpoint. Given a series, an acquisition month, a
//! reference month and a unit count it returns the current worth of the lot.
//!
//! Interest is credited on the monthly anniversary of the subscription, so
//! the simulator is queried on the first day of the last month whose
//! anniversary has already passed.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, TimeDelta};
use log::debug;
use reqwest::{header, Client};
use rust_decimal::Decimal;

use crate::errors::FetchError;
use crate::models::{Valuation, ValuationRequest, EUR};
use crate::provider::ValuationProvider;

use models::SimulatorRow;

/// Provider ID constant
const PROVIDER_ID: &str = "IGCP";

/// Production host of the simulator
pub const DEFAULT_BASE_URL: &str = "https://www.igcp.pt";

/// Path of the simulator endpoint, relative to the base URL
const SIMULATOR_PATH: &str = "/pt/api/simulator-value/query";

/// Date format expected by the simulator
const DATE_FORMAT: &str = "%d/%m/%Y";

/// The simulator rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// IGCP simulator provider.
///
/// # Example
///
/// ```ignore
/// use aforro_market_data::provider::igcp::{IgcpProvider, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
///
/// let provider = IgcpProvider::new(DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT);
/// ```
pub struct IgcpProvider {
    client: Client,
    base_url: String,
}

impl IgcpProvider {
    /// Create a provider talking to `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SIMULATOR_PATH)
    }

    /// Query parameters for one request, in the order the simulator documents them.
    fn query_params(request: &ValuationRequest) -> Vec<(&'static str, String)> {
        let (query_date, acquisition_month) = query_dates(request.as_of, request.acquisition_date);
        vec![
            ("field_serie", request.series.as_str().to_string()),
            (
                "field_field_date",
                query_date.format(DATE_FORMAT).to_string(),
            ),
            (
                "field_field_acquisition_date",
                acquisition_month.format(DATE_FORMAT).to_string(),
            ),
            ("quantity", request.units.to_string()),
        ]
    }
}

/// First day of the month containing `date`.
fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.day0()))
}

/// Computes the `(query_date, acquisition_month)` pair sent to the simulator.
///
/// Both are first-of-month dates. The query month is the month of `as_of`
/// when its day is on or after the acquisition day, otherwise the previous
/// month.
pub fn query_dates(as_of: NaiveDate, acquisition_date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let current_month = first_of_month(as_of);
    let query_date = if as_of.day() < acquisition_date.day() {
        first_of_month(current_month - TimeDelta::days(1))
    } else {
        current_month
    };
    (query_date, first_of_month(acquisition_date))
}

/// Extracts the valuation from a raw simulator body.
fn parse_response(body: &str, query_date: NaiveDate) -> Result<Valuation, FetchError> {
    let rows: Vec<SimulatorRow> = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(PROVIDER_ID, format!("unexpected payload: {}", e)))?;

    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::malformed(PROVIDER_ID, "empty result set"))?;

    let raw_value = row
        .field_value
        .ok_or_else(|| FetchError::malformed(PROVIDER_ID, "missing field_value"))?;
    let value = raw_value.to_decimal().ok_or_else(|| {
        FetchError::malformed(
            PROVIDER_ID,
            format!("field_value is not numeric: {:?}", raw_value),
        )
    })?;
    if value < Decimal::ZERO {
        return Err(FetchError::malformed(
            PROVIDER_ID,
            format!("field_value is negative: {}", value),
        ));
    }

    let acquisition_value = row
        .field_acquisition_value
        .as_ref()
        .and_then(|amount| amount.to_decimal());

    Ok(
        Valuation::new(value, query_date, EUR, PROVIDER_ID.to_string())
            .with_acquisition_value(acquisition_value),
    )
}

#[async_trait]
impl ValuationProvider for IgcpProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_valuation(&self, request: &ValuationRequest) -> Result<Valuation, FetchError> {
        if request.subscription_number.trim().is_empty() {
            return Err(FetchError::InvalidRequest(format!(
                "empty subscription number for series {}",
                request.series
            )));
        }
        if request.units == 0 {
            return Err(FetchError::InvalidRequest(format!(
                "{} has no units",
                request.label()
            )));
        }

        let params = Self::query_params(request);
        let (query_date, _) = query_dates(request.as_of, request.acquisition_date);
        debug!("Querying {} for {}: {:?}", PROVIDER_ID, request.label(), params);

        let response = self
            .client
            .get(self.endpoint())
            .query(&params)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| FetchError::from_transport(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_transport(PROVIDER_ID, e))?;

        let valuation = parse_response(&body, query_date)?;
        debug!(
            "{} valued at {} {} (acquisition value {:?})",
            request.label(),
            valuation.value,
            valuation.currency,
            valuation.acquisition_value
        );
        Ok(valuation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Series;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(as_of: NaiveDate, acquisition_date: NaiveDate) -> ValuationRequest {
        ValuationRequest {
            series: Series::E,
            subscription_number: "123456789".to_string(),
            acquisition_date,
            units: 30000,
            as_of,
        }
    }

    #[test]
    fn test_query_dates_after_anniversary_uses_current_month() {
        let (query, acquisition) = query_dates(date(2025, 3, 20), date(2023, 6, 15));
        assert_eq!(query, date(2025, 3, 1));
        assert_eq!(acquisition, date(2023, 6, 1));
    }

    #[test]
    fn test_query_dates_on_anniversary_uses_current_month() {
        let (query, _) = query_dates(date(2025, 3, 15), date(2023, 6, 15));
        assert_eq!(query, date(2025, 3, 1));
    }

    #[test]
    fn test_query_dates_before_anniversary_uses_previous_month() {
        let (query, _) = query_dates(date(2025, 3, 10), date(2023, 6, 15));
        assert_eq!(query, date(2025, 2, 1));
    }

    #[test]
    fn test_query_dates_wraps_into_previous_year() {
        let (query, _) = query_dates(date(2025, 1, 5), date(2023, 6, 28));
        assert_eq!(query, date(2024, 12, 1));
    }

    #[test]
    fn test_query_params() {
        let params = IgcpProvider::query_params(&request(date(2025, 3, 20), date(2023, 6, 15)));
        assert_eq!(
            params,
            vec![
                ("field_serie", "E".to_string()),
                ("field_field_date", "01/03/2025".to_string()),
                ("field_field_acquisition_date", "01/06/2023".to_string()),
                ("quantity", "30000".to_string()),
            ]
        );
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let provider = IgcpProvider::new("http://localhost:8080/", DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(
            provider.endpoint(),
            "http://localhost:8080/pt/api/simulator-value/query"
        );
    }

    #[test]
    fn test_parse_response() {
        let valuation = parse_response(
            r#"[{"field_value": 32563.80, "field_acquisition_value": 30000.0}]"#,
            date(2025, 3, 1),
        )
        .unwrap();
        assert_eq!(valuation.value, dec!(32563.80));
        assert_eq!(valuation.acquisition_value, Some(dec!(30000)));
        assert_eq!(valuation.query_date, date(2025, 3, 1));
        assert_eq!(valuation.source, "IGCP");
        assert_eq!(valuation.currency, "EUR");
    }

    #[test]
    fn test_parse_response_uses_first_row() {
        let valuation = parse_response(
            r#"[{"field_value": "100.50"}, {"field_value": "999"}]"#,
            date(2025, 3, 1),
        )
        .unwrap();
        assert_eq!(valuation.value, dec!(100.50));
    }

    #[test]
    fn test_parse_response_rejects_empty_array() {
        let err = parse_response("[]", date(2025, 3, 1)).unwrap_err();
        assert_eq!(err, FetchError::malformed("IGCP", "empty result set"));
    }

    #[test]
    fn test_parse_response_rejects_object_payload() {
        let err = parse_response(r#"{"error": "bad serie"}"#, date(2025, 3, 1)).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_response_rejects_html() {
        let err = parse_response("<html>maintenance</html>", date(2025, 3, 1)).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_response_rejects_missing_value() {
        let err = parse_response(
            r#"[{"field_acquisition_value": 30000}]"#,
            date(2025, 3, 1),
        )
        .unwrap_err();
        assert_eq!(err, FetchError::malformed("IGCP", "missing field_value"));
    }

    #[test]
    fn test_parse_response_rejects_non_numeric_value() {
        let err = parse_response(r#"[{"field_value": "abc"}]"#, date(2025, 3, 1)).unwrap_err();
        assert!(err.to_string().contains("field_value is not numeric"));
    }

    #[test]
    fn test_parse_response_rejects_negative_value() {
        let err = parse_response(r#"[{"field_value": "-5"}]"#, date(2025, 3, 1)).unwrap_err();
        assert_eq!(err, FetchError::malformed("IGCP", "field_value is negative: -5"));
    }

    #[test]
    fn test_parse_response_accepts_zero_value() {
        let valuation = parse_response(r#"[{"field_value": 0}]"#, date(2025, 3, 1)).unwrap();
        assert_eq!(valuation.value, Decimal::ZERO);
    }

    /// Serves one canned HTTP response on a local port and returns its base URL.
    async fn serve_once(response: &'static [u8]) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_http_status() {
        let base_url = serve_once(
            b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let provider = IgcpProvider::new(base_url, DEFAULT_REQUEST_TIMEOUT);

        let err = provider
            .fetch_valuation(&request(date(2025, 3, 20), date(2023, 6, 15)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_success_response_is_parsed() {
        let base_url = serve_once(
            b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 26\r\nconnection: close\r\n\r\n[{\"field_value\":32563.80}]",
        )
        .await;
        let provider = IgcpProvider::new(base_url, DEFAULT_REQUEST_TIMEOUT);

        let valuation = provider
            .fetch_valuation(&request(date(2025, 3, 20), date(2023, 6, 15)))
            .await
            .unwrap();
        assert_eq!(valuation.value, dec!(32563.80));
        assert_eq!(valuation.query_date, date(2025, 3, 1));
    }

    #[tokio::test]
    async fn test_refused_connection_maps_to_network_error() {
        // Bind then drop to get a local port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let provider = IgcpProvider::new(format!("http://{}", addr), DEFAULT_REQUEST_TIMEOUT);

        let err = provider
            .fetch_valuation(&request(date(2025, 3, 20), date(2023, 6, 15)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }

    #[tokio::test]
    async fn test_empty_subscription_number_is_rejected_before_network() {
        let provider = IgcpProvider::new("http://127.0.0.1:9", DEFAULT_REQUEST_TIMEOUT);
        let mut req = request(date(2025, 3, 20), date(2023, 6, 15));
        req.subscription_number = "  ".to_string();
        let err = provider.fetch_valuation(&req).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
    }

    #[test]
    fn test_provider_id() {
        let provider = IgcpProvider::new(DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(provider.id(), "IGCP");
    }
}
