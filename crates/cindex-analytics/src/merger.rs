//! 지수/벤치마크 시계열 병합기.
//!
//! 지수 테이블에서 관측 구간을 도출하고, 해당 구간의 벤치마크를 수집한 뒤
//! 날짜 기준 inner join으로 병합합니다. 벤치마크 행이 없는 날짜(주말 등)는
//! 의도적으로 제외됩니다. 비교는 벤치마크 거래일에만 의미가 있습니다.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{info, instrument};

use cindex_core::{IndexRow, MergedRow};
use cindex_data::BenchmarkProvider;

use crate::error::{AnalyticsError, Result};

/// 지수 테이블의 관측 구간 [최소 날짜, 최대 날짜]를 도출합니다.
///
/// 구간은 독립적으로 주어지지 않고 지수 데이터에서 도출되므로,
/// 벤치마크 수집이 관측 구간을 정확히 덮는 것이 보장됩니다.
pub fn derive_range(rows: &[IndexRow]) -> Result<(NaiveDate, NaiveDate)> {
    let mut dates = rows.iter().map(|row| row.date);
    let first = dates.next().ok_or(AnalyticsError::NoIndexRows)?;
    let (min, max) = dates.fold((first, first), |(min, max), date| {
        (min.min(date), max.max(date))
    });
    Ok((min, max))
}

/// 지수 테이블을 벤치마크와 병합하고 파생 필드를 계산합니다.
///
/// 결과는 (asset_id 오름차순, date 오름차순)으로 정렬되며, 자산별 첫 행의
/// `price_pct_change`/`metric`은 직전 관측이 없으므로 `None`입니다.
#[instrument(skip(provider, index_rows), fields(index_rows = index_rows.len()))]
pub async fn merge_with_benchmark<P>(
    provider: &P,
    index_rows: Vec<IndexRow>,
) -> Result<Vec<MergedRow>>
where
    P: BenchmarkProvider + ?Sized,
{
    let (start, end) = derive_range(&index_rows)?;

    let benchmark = provider.daily_history(start, end).await?;
    let by_date: HashMap<NaiveDate, _> = benchmark.iter().map(|row| (row.date, row)).collect();

    // 날짜 기준 inner join
    let mut merged: Vec<MergedRow> = index_rows
        .iter()
        .filter_map(|row| by_date.get(&row.date).map(|bench| MergedRow::join(row, bench)))
        .collect();

    merged.sort_by(|a, b| a.asset_id.cmp(&b.asset_id).then(a.date.cmp(&b.date)));

    // 자산별 직전 행 대비 가격 변화율과 가중 변화율
    let mut prev: Option<(String, f64)> = None;
    for row in merged.iter_mut() {
        if let Some((ref prev_id, prev_price)) = prev {
            if *prev_id == row.asset_id {
                let pct = (row.price - prev_price) / prev_price * 100.0;
                row.price_pct_change = Some(pct);
                row.metric = Some(pct * row.weight);
            }
        }
        prev = Some((row.asset_id.clone(), row.price));
    }

    info!(
        merged_rows = merged.len(),
        benchmark_rows = benchmark.len(),
        %start,
        %end,
        "Merged index with benchmark"
    );

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cindex_core::BenchmarkRow;
    use cindex_data::Result as DataResult;
    use std::collections::BTreeSet;

    struct FakeBenchmark {
        rows: Vec<BenchmarkRow>,
    }

    #[async_trait]
    impl BenchmarkProvider for FakeBenchmark {
        async fn daily_history(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> DataResult<Vec<BenchmarkRow>> {
            Ok(self
                .rows
                .iter()
                .filter(|row| row.date >= start && row.date <= end)
                .cloned()
                .collect())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bench_row(d: NaiveDate, close: f64) -> BenchmarkRow {
        BenchmarkRow {
            date: d,
            open: close - 10.0,
            high: close + 20.0,
            low: close - 20.0,
            close,
            volume: 1_000_000.0,
        }
    }

    fn index_row(asset_id: &str, d: NaiveDate, price: f64, weight: f64) -> IndexRow {
        IndexRow {
            date: d,
            price,
            market_cap: weight * 1_000.0,
            asset_id: asset_id.to_string(),
            weight,
            index_value: weight * price,
        }
    }

    #[test]
    fn test_derive_range() {
        let rows = vec![
            index_row("a", date(2024, 1, 3), 1.0, 1.0),
            index_row("a", date(2024, 1, 1), 1.0, 1.0),
            index_row("a", date(2024, 1, 2), 1.0, 1.0),
        ];
        let (start, end) = derive_range(&rows).unwrap();
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 1, 3));
    }

    #[test]
    fn test_derive_range_empty() {
        assert!(matches!(
            derive_range(&[]),
            Err(AnalyticsError::NoIndexRows)
        ));
    }

    #[tokio::test]
    async fn test_inner_join_drops_unmatched_dates() {
        // 벤치마크는 1/1과 1/3만 거래 (1/2는 휴장)
        let provider = FakeBenchmark {
            rows: vec![
                bench_row(date(2024, 1, 1), 15_000.0),
                bench_row(date(2024, 1, 3), 15_100.0),
            ],
        };
        let index = vec![
            index_row("btc", date(2024, 1, 1), 100.0, 1.0),
            index_row("btc", date(2024, 1, 2), 110.0, 1.0),
            index_row("btc", date(2024, 1, 3), 121.0, 1.0),
        ];

        let merged = merge_with_benchmark(&provider, index).await.unwrap();

        let merged_dates: BTreeSet<NaiveDate> = merged.iter().map(|r| r.date).collect();
        assert_eq!(
            merged_dates,
            BTreeSet::from([date(2024, 1, 1), date(2024, 1, 3)])
        );
    }

    #[tokio::test]
    async fn test_pct_change_per_asset() {
        let provider = FakeBenchmark {
            rows: vec![
                bench_row(date(2024, 1, 1), 15_000.0),
                bench_row(date(2024, 1, 2), 15_100.0),
            ],
        };
        let index = vec![
            index_row("btc", date(2024, 1, 1), 100.0, 0.8),
            index_row("btc", date(2024, 1, 2), 110.0, 0.8),
            index_row("eth", date(2024, 1, 1), 50.0, 0.2),
            index_row("eth", date(2024, 1, 2), 45.0, 0.2),
        ];

        let merged = merge_with_benchmark(&provider, index).await.unwrap();

        assert_eq!(merged.len(), 4);

        // 정렬: (asset_id, date)
        assert_eq!(merged[0].asset_id, "btc");
        assert_eq!(merged[0].date, date(2024, 1, 1));
        assert_eq!(merged[3].asset_id, "eth");
        assert_eq!(merged[3].date, date(2024, 1, 2));

        // 자산별 첫 행은 변화율 미정의
        assert!(merged[0].price_pct_change.is_none());
        assert!(merged[0].metric.is_none());
        assert!(merged[2].price_pct_change.is_none());

        // (110 - 100) / 100 * 100 = 10%
        let btc_pct = merged[1].price_pct_change.unwrap();
        assert!((btc_pct - 10.0).abs() < 1e-12);
        assert!((merged[1].metric.unwrap() - 10.0 * 0.8).abs() < 1e-12);

        // (45 - 50) / 50 * 100 = -10%
        let eth_pct = merged[3].price_pct_change.unwrap();
        assert!((eth_pct - (-10.0)).abs() < 1e-12);
        assert!((merged[3].metric.unwrap() - (-10.0 * 0.2)).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_asset_boundary_does_not_leak_pct_change() {
        // btc의 마지막 가격이 eth의 첫 변화율 계산에 사용되면 안 됨
        let provider = FakeBenchmark {
            rows: vec![bench_row(date(2024, 1, 1), 15_000.0)],
        };
        let index = vec![
            index_row("btc", date(2024, 1, 1), 100.0, 0.5),
            index_row("eth", date(2024, 1, 1), 50.0, 0.5),
        ];

        let merged = merge_with_benchmark(&provider, index).await.unwrap();

        assert!(merged.iter().all(|r| r.price_pct_change.is_none()));
    }

    #[tokio::test]
    async fn test_benchmark_fields_carried_over() {
        let provider = FakeBenchmark {
            rows: vec![bench_row(date(2024, 1, 1), 15_000.0)],
        };
        let index = vec![index_row("btc", date(2024, 1, 1), 100.0, 1.0)];

        let merged = merge_with_benchmark(&provider, index).await.unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].close, 15_000.0);
        assert_eq!(merged[0].open, 14_990.0);
        assert_eq!(merged[0].volume, 1_000_000.0);
    }

    #[tokio::test]
    async fn test_empty_index_is_an_error() {
        let provider = FakeBenchmark { rows: vec![] };
        let err = merge_with_benchmark(&provider, vec![]).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::NoIndexRows));
    }
}
