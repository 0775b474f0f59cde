//! 지수/벤치마크 병합 결과 행.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BenchmarkRow, IndexRow};

/// 지수 행과 벤치마크 행을 날짜로 inner join한 결과.
///
/// `price_pct_change`와 `metric`은 (asset_id, date) 정렬 후
/// 자산별 직전 행 대비로 계산되며, 자산별 첫 행에서는 정의되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    /// 날짜 (양쪽 테이블에 모두 존재)
    pub date: NaiveDate,
    /// 자산 식별자
    pub asset_id: String,
    /// 자산 가격
    pub price: f64,
    /// 자산 시가총액
    pub market_cap: f64,
    /// 시가총액 가중치
    pub weight: f64,
    /// 지수 기여값
    pub index_value: f64,
    /// 벤치마크 시가
    pub open: f64,
    /// 벤치마크 고가
    pub high: f64,
    /// 벤치마크 저가
    pub low: f64,
    /// 벤치마크 종가
    pub close: f64,
    /// 벤치마크 거래량
    pub volume: f64,
    /// 직전 관측 대비 가격 변화율 (%), 자산별 첫 행은 None
    pub price_pct_change: Option<f64>,
    /// 가중 변화율 (price_pct_change × weight), 첫 행은 None
    pub metric: Option<f64>,
}

impl MergedRow {
    /// 날짜가 일치하는 지수 행과 벤치마크 행을 결합합니다.
    ///
    /// 파생 필드는 정렬 이후 별도 단계에서 채워집니다.
    pub fn join(index: &IndexRow, benchmark: &BenchmarkRow) -> Self {
        debug_assert_eq!(index.date, benchmark.date);
        Self {
            date: index.date,
            asset_id: index.asset_id.clone(),
            price: index.price,
            market_cap: index.market_cap,
            weight: index.weight,
            index_value: index.index_value,
            open: benchmark.open,
            high: benchmark.high,
            low: benchmark.low,
            close: benchmark.close,
            volume: benchmark.volume,
            price_pct_change: None,
            metric: None,
        }
    }
}
