//! Yahoo Finance 차트 API 클라이언트.
//!
//! 벤치마크 지수(기본: NASDAQ Composite)의 일별 OHLCV를 수집합니다.
//! 타임스탬프는 날짜 단위로 정규화되며, 거래일만 반환됩니다.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use cindex_core::{BenchmarkConfig, BenchmarkRow};

use super::BenchmarkProvider;
use crate::error::{DataError, Result};

/// Yahoo Finance 차트 API v8 응답 구조.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance 차트 API 클라이언트.
#[derive(Clone)]
pub struct YahooFinanceClient {
    client: reqwest::Client,
    base_url: String,
    symbol: String,
}

impl YahooFinanceClient {
    /// 설정에서 클라이언트를 생성합니다.
    pub fn new(config: &BenchmarkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| DataError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            symbol: config.symbol.clone(),
        })
    }

    /// 기본 URL을 변경합니다 (테스트용).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl BenchmarkProvider for YahooFinanceClient {
    async fn daily_history(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<BenchmarkRow>> {
        if start > end {
            return Err(DataError::InvalidRange(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        // 날짜 범위를 UNIX 타임스탬프 경계로 변환 (양끝 포함)
        let period1 = Utc
            .from_utc_datetime(&start.and_hms_opt(0, 0, 0).unwrap_or_default())
            .timestamp();
        let period2 = Utc
            .from_utc_datetime(&end.and_hms_opt(23, 59, 59).unwrap_or_default())
            .timestamp();

        let url = format!("{}/v8/finance/chart/{}", self.base_url, self.symbol);

        debug!(symbol = %self.symbol, %start, %end, "Fetching benchmark history");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string().as_str()),
                ("period2", period2.to_string().as_str()),
                ("interval", "1d"),
                ("events", "history"),
            ])
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                429 => DataError::RateLimit(format!("Yahoo Finance rate limit hit: {}", body)),
                _ => DataError::Network(format!("Yahoo Finance API error: {} - {}", status, body)),
            });
        }

        let chart: ChartResponse = response
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        if let Some(error) = chart.chart.error {
            return Err(DataError::Parse(format!(
                "Yahoo Finance error: {} - {}",
                error.code, error.description
            )));
        }

        let result = chart
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| DataError::Parse("No data returned from Yahoo Finance".to_string()))?;

        let timestamps = result.timestamp.unwrap_or_default();
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::Parse("No quote data in response".to_string()))?;

        let opens = quote.open.unwrap_or_default();
        let highs = quote.high.unwrap_or_default();
        let lows = quote.low.unwrap_or_default();
        let closes = quote.close.unwrap_or_default();
        let volumes = quote.volume.unwrap_or_default();

        let mut rows = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let open = opens.get(i).and_then(|v| *v);
            let high = highs.get(i).and_then(|v| *v);
            let low = lows.get(i).and_then(|v| *v);
            let close = closes.get(i).and_then(|v| *v);
            let volume = volumes.get(i).and_then(|v| *v);

            // 모든 필드가 유효한 행만 사용
            if let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
                (open, high, low, close, volume)
            {
                let date = chrono::DateTime::from_timestamp(ts, 0)
                    .map(|dt| dt.date_naive())
                    .ok_or_else(|| {
                        DataError::Parse(format!("Timestamp out of range: {}", ts))
                    })?;

                rows.push(BenchmarkRow {
                    date,
                    open,
                    high,
                    low,
                    close,
                    volume,
                });
            }
        }

        rows.sort_by_key(|row| row.date);

        debug!(symbol = %self.symbol, rows = rows.len(), "Fetched benchmark history");

        Ok(rows)
    }
}
