//! 분석 모듈 오류 타입.

use chrono::NaiveDate;
use thiserror::Error;

use cindex_data::DataError;

/// 분석 관련 오류.
///
/// 데이터 정합성 위반(길이 불일치, 0 시가총액, 빈 입력)은 값으로
/// 얼버무리지 않고 명시적 오류로 표면화합니다.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// 자산 목록이 비어 있음
    #[error("Asset list is empty")]
    EmptyAssetList,

    /// 가격/시가총액 시계열 길이 불일치
    #[error("Series length mismatch for {asset_id}: {prices} prices vs {market_caps} market caps")]
    SeriesLengthMismatch {
        asset_id: String,
        prices: usize,
        market_caps: usize,
    },

    /// 날짜 그룹의 시가총액 합계가 0 (가중치 정의 불가)
    #[error("Total market cap is zero on {date}: weights are undefined")]
    ZeroMarketCap { date: NaiveDate },

    /// 병합할 지수 행이 없음
    #[error("No index rows to merge")]
    NoIndexRows,

    /// 렌더링할 병합 데이터가 없음
    #[error("No merged data for asset: {asset_id}")]
    NoMergedData { asset_id: String },

    /// 업스트림 수집 오류
    #[error(transparent)]
    Data(#[from] DataError),

    /// 출력 파일 쓰기 오류
    #[error("Export error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyticsError {
    /// 경계에서 복구 가능한 오류인지 확인합니다.
    ///
    /// 한 자산의 표시 데이터가 없는 경우는 전체 실행을 중단하지 않고
    /// 보고 후 다음 자산을 계속 처리합니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalyticsError::NoMergedData { .. })
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
