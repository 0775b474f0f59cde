//! 비교 차트 데이터 구조
//!
//! 자산별 가중 변화율(metric)과 벤치마크 종가를 같은 날짜 축 위에
//! 독립 스케일로 그리기 위한 차트 데이터를 생성합니다.
//! 렌더링 자체는 외부 소비자(대시보드 등)의 몫입니다.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cindex_core::MergedRow;

use crate::error::{AnalyticsError, Result};

/// 차트 데이터 포인트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// X축 값 (타임스탬프, 밀리초)
    pub x: i64,

    /// Y축 값
    pub y: f64,
}

impl ChartPoint {
    /// 날짜와 값으로 차트 포인트를 생성합니다.
    pub fn new(date: NaiveDate, value: f64) -> Self {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        Self {
            x: midnight.and_utc().timestamp_millis(),
            y: value,
        }
    }
}

/// 한 자산의 이중 축 비교 차트 데이터.
///
/// `left`는 가중 변화율(metric), `right`는 벤치마크 종가 시리즈이며
/// 두 시리즈는 같은 날짜 축을 공유합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonChart {
    /// 자산 식별자
    pub asset_id: String,

    /// 왼쪽 축 레이블
    pub left_label: String,

    /// 오른쪽 축 레이블
    pub right_label: String,

    /// 왼쪽 축 시리즈 (metric)
    pub left: Vec<ChartPoint>,

    /// 오른쪽 축 시리즈 (벤치마크 종가)
    pub right: Vec<ChartPoint>,
}

impl ComparisonChart {
    /// 병합 테이블에서 한 자산의 비교 차트 데이터를 생성합니다.
    ///
    /// 같은 날짜의 중복 행은 평균이 아니라 합산됩니다. 원본 집계 정책을
    /// 그대로 보존한 것으로, 중복이 없는 정상 입력에서는 영향이 없습니다.
    /// 미정의 metric(자산별 첫 행)은 합산에 0으로 기여합니다.
    ///
    /// # Errors
    ///
    /// 해당 자산의 병합 행이 없으면 [`AnalyticsError::NoMergedData`].
    pub fn build(merged: &[MergedRow], asset_id: &str) -> Result<Self> {
        // 날짜별 (metric 합, 종가 합)
        let mut by_date: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for row in merged.iter().filter(|row| row.asset_id == asset_id) {
            let entry = by_date.entry(row.date).or_insert((0.0, 0.0));
            entry.0 += row.metric.unwrap_or(0.0);
            entry.1 += row.close;
        }

        if by_date.is_empty() {
            return Err(AnalyticsError::NoMergedData {
                asset_id: asset_id.to_string(),
            });
        }

        let left = by_date
            .iter()
            .map(|(&date, &(metric, _))| ChartPoint::new(date, metric))
            .collect();
        let right = by_date
            .iter()
            .map(|(&date, &(_, close))| ChartPoint::new(date, close))
            .collect();

        Ok(Self {
            asset_id: asset_id.to_string(),
            left_label: "metric".to_string(),
            right_label: "close".to_string(),
            left,
            right,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn merged_row(
        asset_id: &str,
        d: NaiveDate,
        metric: Option<f64>,
        close: f64,
    ) -> MergedRow {
        MergedRow {
            date: d,
            asset_id: asset_id.to_string(),
            price: 100.0,
            market_cap: 1_000.0,
            weight: 0.5,
            index_value: 50.0,
            open: close - 10.0,
            high: close + 10.0,
            low: close - 20.0,
            close,
            volume: 1_000_000.0,
            price_pct_change: metric.map(|m| m / 0.5),
            metric,
        }
    }

    #[test]
    fn test_empty_merged_set_reports_no_data() {
        let err = ComparisonChart::build(&[], "bitcoin").unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::NoMergedData { ref asset_id } if asset_id == "bitcoin"
        ));
    }

    #[test]
    fn test_filters_to_requested_asset() {
        let merged = vec![
            merged_row("bitcoin", date(2024, 1, 1), None, 15_000.0),
            merged_row("ethereum", date(2024, 1, 1), None, 15_000.0),
            merged_row("bitcoin", date(2024, 1, 2), Some(1.5), 15_100.0),
        ];

        let chart = ComparisonChart::build(&merged, "bitcoin").unwrap();

        assert_eq!(chart.asset_id, "bitcoin");
        assert_eq!(chart.left.len(), 2);
        assert_eq!(chart.right.len(), 2);
    }

    #[test]
    fn test_duplicate_dates_are_summed_not_averaged() {
        let merged = vec![
            merged_row("bitcoin", date(2024, 1, 1), Some(1.0), 15_000.0),
            merged_row("bitcoin", date(2024, 1, 1), Some(2.0), 15_000.0),
        ];

        let chart = ComparisonChart::build(&merged, "bitcoin").unwrap();

        assert_eq!(chart.left.len(), 1);
        assert!((chart.left[0].y - 3.0).abs() < 1e-12);
        // 종가도 합산됨
        assert!((chart.right[0].y - 30_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_undefined_metric_contributes_zero() {
        let merged = vec![merged_row("bitcoin", date(2024, 1, 1), None, 15_000.0)];

        let chart = ComparisonChart::build(&merged, "bitcoin").unwrap();

        assert_eq!(chart.left[0].y, 0.0);
        assert_eq!(chart.right[0].y, 15_000.0);
    }

    #[test]
    fn test_series_sorted_by_date() {
        let merged = vec![
            merged_row("bitcoin", date(2024, 1, 3), Some(1.0), 15_200.0),
            merged_row("bitcoin", date(2024, 1, 1), Some(2.0), 15_000.0),
            merged_row("bitcoin", date(2024, 1, 2), Some(3.0), 15_100.0),
        ];

        let chart = ComparisonChart::build(&merged, "bitcoin").unwrap();

        let xs: Vec<i64> = chart.left.iter().map(|p| p.x).collect();
        let mut sorted = xs.clone();
        sorted.sort_unstable();
        assert_eq!(xs, sorted);
    }

    #[test]
    fn test_chart_point_epoch() {
        let point = ChartPoint::new(date(1970, 1, 2), 1.5);
        assert_eq!(point.x, 86_400_000);
        assert_eq!(point.y, 1.5);
    }
}
