//! 타임스탬프 정규화.
//!
//! 데이터 제공자의 epoch 밀리초 타임스탬프를 UTC 기준 달력 날짜로 변환합니다.

use chrono::{DateTime, NaiveDate};

/// epoch 밀리초를 UTC 달력 날짜로 변환합니다.
///
/// 동일한 입력은 항상 동일한 출력을 반환하는 순수 함수입니다.
/// 음수 또는 0 타임스탬프는 epoch 이전/당일 날짜로 매핑됩니다.
/// chrono 표현 범위를 벗어나는 극단값은 표현 가능한 최소/최대 날짜로 고정됩니다.
pub fn epoch_ms_to_date(timestamp_ms: i64) -> NaiveDate {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(dt) => dt.date_naive(),
        None if timestamp_ms < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_zero() {
        assert_eq!(
            epoch_ms_to_date(0),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_one_day_after_epoch() {
        assert_eq!(
            epoch_ms_to_date(86_400_000),
            NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_negative_timestamp() {
        // epoch 하루 전
        assert_eq!(
            epoch_ms_to_date(-86_400_000),
            NaiveDate::from_ymd_opt(1969, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_sub_day_truncation() {
        // 같은 날의 밀리초는 모두 같은 날짜로 정규화됨
        assert_eq!(epoch_ms_to_date(1), epoch_ms_to_date(86_399_999));
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        let _ = epoch_ms_to_date(i64::MIN);
        let _ = epoch_ms_to_date(i64::MAX);
    }

    #[test]
    fn test_known_date() {
        // 2024-01-01T00:00:00Z
        assert_eq!(
            epoch_ms_to_date(1_704_067_200_000),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    proptest::proptest! {
        #[test]
        fn prop_total_and_monotonic(a in proptest::num::i64::ANY, b in proptest::num::i64::ANY) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            proptest::prop_assert!(epoch_ms_to_date(lo) <= epoch_ms_to_date(hi));
        }
    }
}
