//! 지수 계산 및 벤치마크 비교.
//!
//! 이 crate는 파이프라인의 변환 단계를 제공합니다:
//! - 자산별 시계열을 평탄화하고 시가총액 가중치를 계산하는 지수 빌더
//! - 지수/벤치마크 테이블을 날짜로 inner join하는 병합기
//! - 이중 축 비교 차트 데이터 생성 (Presenter)
//! - 병합 테이블 CSV 내보내기
//!
//! 모든 단계는 불변 테이블을 입력받아 새 테이블을 반환하는 순수 변환이며,
//! 단계 간 공유 가변 상태는 없습니다.

pub mod builder;
pub mod error;
pub mod export;
pub mod merger;
pub mod presenter;

pub use builder::{build_index, IndexRequest};
pub use error::{AnalyticsError, Result};
pub use export::write_merged_csv;
pub use merger::{derive_range, merge_with_benchmark};
pub use presenter::{ChartPoint, ComparisonChart};
