//! 지수 파이프라인의 핵심 에러 타입.
//!
//! 이 모듈은 설정 로딩 등 핵심 계층에서 사용되는 에러 타입을 정의합니다.
//! 데이터 수집/분석 에러는 각 크레이트에서 별도로 정의합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필수 자격증명 누락
    #[error("자격증명 누락: {0}")]
    MissingCredential(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
