//! # Cindex Core
//!
//! 시가총액 가중 암호화폐 지수 파이프라인의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 자산 관측치 및 지수 행 구조체
//! - 벤치마크 OHLCV 행
//! - 병합 결과 행
//! - 타임스탬프 정규화
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod timestamp;

pub use config::*;
pub use domain::*;
pub use error::{CoreError, CoreResult};
pub use logging::*;
pub use timestamp::epoch_ms_to_date;
