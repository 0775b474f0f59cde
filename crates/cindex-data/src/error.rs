//! 데이터 수집 모듈 오류 타입.

use thiserror::Error;

/// 데이터 수집 관련 오류.
///
/// 업스트림 수집 실패(네트워크, 인증, 미지의 식별자, 잘못된 범위)를
/// 구분하여 호출자가 실패 단계를 식별할 수 있게 합니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// 네트워크/전송 오류
    #[error("Network error: {0}")]
    Network(String),

    /// 요청 한도 초과
    #[error("Rate limited: {0}")]
    RateLimit(String),

    /// 인증 실패 (잘못된 API 키 등)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// 알 수 없는 자산 식별자
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    /// 잘못된 조회 범위/윈도우
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// 응답 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 설정 오류 (필수 설정 누락)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataError {
    /// 재시도 가능한 오류인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DataError::Network(_) | DataError::RateLimit(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::Parse(err.to_string())
        } else {
            DataError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
