//! 벤치마크 지수 OHLCV 행.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 벤치마크 지수의 일별 OHLCV 행.
///
/// 거래일당 하나씩 존재하며, 타임스탬프는 날짜 단위로 정규화됩니다
/// (거래소 시간대 제거). 주말/휴일 행은 보장되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량
    pub volume: f64,
}
