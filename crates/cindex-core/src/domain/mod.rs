//! 파이프라인 도메인 모델.
//!
//! 파이프라인 각 단계가 생산/소비하는 테이블 행 타입을 정의합니다.
//! 모든 테이블은 실행마다 새로 구성되며, 단계 간에는 불변 값으로 전달됩니다.

pub mod benchmark;
pub mod merged;
pub mod observation;

pub use benchmark::BenchmarkRow;
pub use merged::MergedRow;
pub use observation::{AssetObservation, IndexRow, RawPoint};
