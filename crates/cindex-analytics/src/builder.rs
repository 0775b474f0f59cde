//! 시가총액 가중 지수 빌더.
//!
//! 자산별 가격/시가총액 시계열을 하나의 long-form 테이블로 평탄화하고,
//! 날짜별 시가총액 가중치와 가중 지수값을 계산합니다.
//!
//! # 동작 방식
//!
//! 1. 자산마다 Provider를 한 번 호출. 단일 자산 실패 시 전체 빌드 실패 (fail-fast)
//! 2. 가격/시가총액 배열을 위치로 zip하고 타임스탬프를 날짜로 정규화
//! 3. 날짜별로 그룹화하여 시가총액 합계 → 가중치 → 지수값 계산
//!
//! 자산 수집은 입력 순서대로 순차 실행되어 출력 순서가 재현 가능합니다.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use cindex_core::{AssetObservation, IndexRow};
use cindex_data::{AssetSeriesProvider, MarketChartRequest, Window};

use crate::error::{AnalyticsError, Result};

/// 지수 구축 요청.
///
/// 조회 윈도우와 통화/정밀도는 한 번의 호출에 포함된 모든 자산에
/// 공통으로 적용됩니다.
#[derive(Debug, Clone)]
pub struct IndexRequest {
    /// 자산 식별자 목록 (비어 있으면 안 됨)
    pub asset_ids: Vec<String>,
    /// 조회 윈도우
    pub window: Window,
    /// 견적 통화
    pub currency: String,
    /// 소수점 정밀도
    pub precision: u8,
}

impl IndexRequest {
    /// 기본 파라미터(usd, 정밀도 2)로 요청을 생성합니다.
    pub fn new(asset_ids: Vec<String>, window: Window) -> Self {
        Self {
            asset_ids,
            window,
            currency: "usd".to_string(),
            precision: 2,
        }
    }
}

/// 자산 목록과 조회 윈도우로 지수 테이블을 구축합니다.
///
/// 반환되는 행은 (자산 입력 순서, 시간 순서)로 정렬되며,
/// 같은 날짜의 가중치 합은 1.0입니다.
///
/// # Errors
///
/// - 자산 목록이 비어 있으면 [`AnalyticsError::EmptyAssetList`]
/// - 어느 자산이든 수집에 실패하면 해당 [`AnalyticsError::Data`] (fail-fast)
/// - 가격/시가총액 길이가 다르면 [`AnalyticsError::SeriesLengthMismatch`]
/// - 어느 날짜든 시가총액 합계가 0이면 [`AnalyticsError::ZeroMarketCap`]
#[instrument(skip(provider, request), fields(assets = request.asset_ids.len()))]
pub async fn build_index<P>(provider: &P, request: &IndexRequest) -> Result<Vec<IndexRow>>
where
    P: AssetSeriesProvider + ?Sized,
{
    if request.asset_ids.is_empty() {
        return Err(AnalyticsError::EmptyAssetList);
    }

    // 1. 자산별 수집 및 평탄화
    let mut observations = Vec::new();
    for asset_id in &request.asset_ids {
        let mut chart_request =
            MarketChartRequest::new(asset_id.clone(), request.window).with_currency(&request.currency);
        chart_request.precision = request.precision;
        let chart = provider.market_chart(&chart_request).await?;

        if chart.prices.len() != chart.market_caps.len() {
            return Err(AnalyticsError::SeriesLengthMismatch {
                asset_id: asset_id.clone(),
                prices: chart.prices.len(),
                market_caps: chart.market_caps.len(),
            });
        }

        if chart.prices.is_empty() {
            warn!(asset_id = %asset_id, "Provider returned an empty series");
        }

        for (price, market_cap) in chart.prices.into_iter().zip(chart.market_caps) {
            observations.push(AssetObservation::from_raw_pair(asset_id, price, market_cap));
        }
    }

    // 2. 날짜별 시가총액 합계
    let totals = date_totals(&observations);

    // 3. 가중치 및 지수값 계산
    let mut rows = Vec::with_capacity(observations.len());
    for obs in observations {
        let total = totals[&obs.date];
        if total == 0.0 {
            return Err(AnalyticsError::ZeroMarketCap { date: obs.date });
        }
        rows.push(IndexRow::from_observation(obs, total));
    }

    info!(rows = rows.len(), assets = request.asset_ids.len(), "Index table built");

    Ok(rows)
}

/// 날짜별 시가총액 합계를 계산합니다.
fn date_totals(observations: &[AssetObservation]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for obs in observations {
        *totals.entry(obs.date).or_insert(0.0) += obs.market_cap;
    }
    totals
}
