//! CoinGecko Pro API 클라이언트.
//!
//! 자산별 가격/시가총액 과거 시계열을 수집합니다.
//!
//! # API 키 관리
//!
//! API 키는 `AppConfig`를 통해 명시적으로 전달됩니다.
//! 키가 비어 있으면 클라이언트 생성 시점에 실패합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use cindex_data::{CoinGeckoClient, MarketChartRequest, Window};
//!
//! let client = CoinGeckoClient::new(&config.coingecko)?;
//! let request = MarketChartRequest::new("bitcoin", Window::Days(14));
//! let chart = client.market_chart(&request).await?;
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use cindex_core::{CoinGeckoConfig, RawPoint};

use super::AssetSeriesProvider;
use crate::error::{DataError, Result};

/// 조회 윈도우 (일수 또는 전체 기간).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// 최근 N일
    Days(u32),
    /// 제공자가 보유한 전체 기간
    Max,
}

impl Window {
    /// API 쿼리 파라미터 값 반환.
    pub fn as_query_value(&self) -> String {
        match self {
            Window::Days(n) => n.to_string(),
            Window::Max => "max".to_string(),
        }
    }
}

impl std::str::FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "max" => Ok(Window::Max),
            other => other
                .parse::<u32>()
                .map(Window::Days)
                .map_err(|_| format!("Invalid window: {}. Expected a day count or 'max'", s)),
        }
    }
}

/// 샘플링 간격.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interval {
    /// 일 단위
    #[default]
    Daily,
}

impl Interval {
    /// API 쿼리 파라미터 값 반환.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
        }
    }
}

/// 시장 차트 요청.
///
/// 문자열 보간 대신 타입이 지정된 요청으로 필수 필드를 전송 전에 검증합니다.
#[derive(Debug, Clone)]
pub struct MarketChartRequest {
    /// 자산 식별자 (예: "bitcoin")
    pub asset_id: String,
    /// 조회 윈도우
    pub window: Window,
    /// 견적 통화
    pub currency: String,
    /// 샘플링 간격
    pub interval: Interval,
    /// 소수점 정밀도
    pub precision: u8,
}

impl MarketChartRequest {
    /// 기본 파라미터(usd, daily, 정밀도 2)로 요청을 생성합니다.
    pub fn new(asset_id: impl Into<String>, window: Window) -> Self {
        Self {
            asset_id: asset_id.into(),
            window,
            currency: "usd".to_string(),
            interval: Interval::Daily,
            precision: 2,
        }
    }

    /// 견적 통화를 설정합니다.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// 전송 전 필수 필드를 검증합니다.
    pub fn validate(&self) -> Result<()> {
        if self.asset_id.trim().is_empty() {
            return Err(DataError::UnknownAsset(
                "asset id must not be empty".to_string(),
            ));
        }
        if self.window == Window::Days(0) {
            return Err(DataError::InvalidRange(
                "window must be at least one day".to_string(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(DataError::Config("currency must not be empty".to_string()));
        }
        Ok(())
    }
}

/// 시장 차트 응답.
///
/// `prices`와 `market_caps`는 타임스탬프가 동일한 병렬 배열이며
/// 위치로 대응됩니다.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChartResponse {
    /// `[epoch_ms, price]` 쌍
    pub prices: Vec<RawPoint>,
    /// `[epoch_ms, market_cap]` 쌍
    pub market_caps: Vec<RawPoint>,
}

/// CoinGecko Pro API 클라이언트.
#[derive(Clone, Debug)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl CoinGeckoClient {
    /// 설정에서 클라이언트를 생성합니다.
    ///
    /// API 키가 비어 있으면 즉시 실패합니다.
    pub fn new(config: &CoinGeckoConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(DataError::Config(
                "coingecko.api_key is not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| DataError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 기본 URL을 변경합니다 (테스트용).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl AssetSeriesProvider for CoinGeckoClient {
    async fn market_chart(&self, request: &MarketChartRequest) -> Result<MarketChartResponse> {
        request.validate()?;

        let url = format!(
            "{}/api/v3/coins/{}/market_chart",
            self.base_url, request.asset_id
        );

        debug!(asset_id = %request.asset_id, url = %url, "Fetching market chart");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", request.currency.as_str()),
                ("days", &request.window.as_query_value()),
                ("interval", request.interval.as_str()),
                ("precision", &request.precision.to_string()),
            ])
            .header("accept", "application/json")
            .header("x-cg-pro-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => DataError::Auth(format!("CoinGecko rejected the API key: {}", body)),
                404 => DataError::UnknownAsset(request.asset_id.clone()),
                429 => DataError::RateLimit(format!("CoinGecko rate limit hit: {}", body)),
                _ => DataError::Network(format!("CoinGecko API error: {} - {}", status, body)),
            });
        }

        let chart: MarketChartResponse = response
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        debug!(
            asset_id = %request.asset_id,
            prices = chart.prices.len(),
            market_caps = chart.market_caps.len(),
            "Fetched market chart"
        );

        Ok(chart)
    }
}
