//! 자산 관측치 및 지수 행.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timestamp::epoch_ms_to_date;

/// 데이터 제공자의 원시 시계열 포인트.
///
/// 제공자는 `[epoch_ms, value]` 쌍의 배열로 가격과 시가총액을 반환합니다.
/// 한 자산의 두 배열은 타임스탬프가 동일하며 위치로 대응됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(from = "(i64, f64)", into = "(i64, f64)")]
pub struct RawPoint {
    /// epoch 밀리초 타임스탬프
    pub timestamp_ms: i64,
    /// 값 (가격 또는 시가총액)
    pub value: f64,
}

impl From<(i64, f64)> for RawPoint {
    fn from((timestamp_ms, value): (i64, f64)) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }
}

impl From<RawPoint> for (i64, f64) {
    fn from(point: RawPoint) -> Self {
        (point.timestamp_ms, point.value)
    }
}

/// 자산별 일일 관측치.
///
/// (자산, 날짜)당 하나씩 생성되며, 생성 후 불변입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetObservation {
    /// 관측 날짜 (UTC 기준 일 단위)
    pub date: NaiveDate,
    /// 가격
    pub price: f64,
    /// 시가총액
    pub market_cap: f64,
    /// 자산 식별자 (예: "bitcoin")
    pub asset_id: String,
}

impl AssetObservation {
    /// 가격/시가총액 원시 포인트 쌍에서 관측치를 생성합니다.
    ///
    /// 타임스탬프는 가격 포인트 기준으로 정규화됩니다 (두 배열은 위치로 대응).
    pub fn from_raw_pair(asset_id: &str, price: RawPoint, market_cap: RawPoint) -> Self {
        Self {
            date: epoch_ms_to_date(price.timestamp_ms),
            price: price.value,
            market_cap: market_cap.value,
            asset_id: asset_id.to_string(),
        }
    }
}

/// 가중치가 계산된 지수 행.
///
/// 가중치는 같은 날짜에 존재하는 모든 자산의 시가총액 합에 대한
/// 해당 자산의 비율이며, 날짜별 가중치 합은 1.0입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRow {
    /// 관측 날짜
    pub date: NaiveDate,
    /// 가격
    pub price: f64,
    /// 시가총액
    pub market_cap: f64,
    /// 자산 식별자
    pub asset_id: String,
    /// 시가총액 가중치 (날짜별 합계 1.0)
    pub weight: f64,
    /// 지수 기여값 (weight × price)
    pub index_value: f64,
}

impl IndexRow {
    /// 관측치와 해당 날짜의 시가총액 합계로부터 지수 행을 생성합니다.
    ///
    /// 호출 전에 `total_market_cap`이 0이 아님을 보장해야 합니다.
    pub fn from_observation(obs: AssetObservation, total_market_cap: f64) -> Self {
        let weight = obs.market_cap / total_market_cap;
        Self {
            date: obs.date,
            price: obs.price,
            index_value: weight * obs.price,
            market_cap: obs.market_cap,
            asset_id: obs.asset_id,
            weight,
        }
    }
}
