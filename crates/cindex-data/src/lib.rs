//! 외부 데이터 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - 자산별 가격/시가총액 시계열 Provider (CoinGecko)
//! - 벤치마크 일별 OHLCV Provider (Yahoo Finance 차트 API)
//! - 테스트용 합성 Provider를 위한 trait 추상화
//!
//! Provider는 재시도/캐싱/요청 제한을 내부적으로 수행하지 않습니다.
//! 해당 정책은 호출자 책임입니다.

pub mod error;
pub mod provider;

pub use error::{DataError, Result};
pub use provider::{
    AssetSeriesProvider, BenchmarkProvider, CoinGeckoClient, Interval, MarketChartRequest,
    MarketChartResponse, Window, YahooFinanceClient,
};
