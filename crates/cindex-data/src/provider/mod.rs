//! 데이터 Provider 모듈.
//!
//! 다양한 소스에서 시계열 데이터를 가져오는 Provider들을 정의합니다.
//!
//! ## CoinGecko
//! - `CoinGeckoClient`: Pro API 클라이언트 (인증키 필요)
//! - 자산별 가격/시가총액 과거 시계열
//!
//! ## Yahoo Finance
//! - `YahooFinanceClient`: 차트 API v8 클라이언트
//! - 벤치마크 지수(NASDAQ Composite) 일별 OHLCV

pub mod coingecko;
pub mod yahoo;

use async_trait::async_trait;
use chrono::NaiveDate;

use cindex_core::BenchmarkRow;

use crate::error::Result;

pub use coingecko::{CoinGeckoClient, Interval, MarketChartRequest, MarketChartResponse, Window};
pub use yahoo::YahooFinanceClient;

/// 자산 시계열 Provider.
///
/// 자산 식별자와 조회 윈도우에 대해 가격/시가총액 병렬 시계열을 반환합니다.
/// 두 시계열은 타임스탬프가 동일하며 위치로 대응됩니다.
#[async_trait]
pub trait AssetSeriesProvider: Send + Sync {
    /// 자산의 과거 시계열을 조회합니다.
    async fn market_chart(&self, request: &MarketChartRequest) -> Result<MarketChartResponse>;
}

/// 벤치마크 시계열 Provider.
///
/// 날짜 범위(양끝 포함)에 대해 거래일별 OHLCV 행을 날짜 오름차순으로 반환합니다.
/// 주말/휴일 행은 보장되지 않습니다.
#[async_trait]
pub trait BenchmarkProvider: Send + Sync {
    /// 벤치마크 일별 시계열을 조회합니다.
    async fn daily_history(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<BenchmarkRow>>;
}
