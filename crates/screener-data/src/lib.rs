//! 데이터 소스 및 결과 게시.
//!
//! 이 crate는 다음을 제공합니다:
//! - JSON 픽스처, CSV 디렉토리, 메모리 기반 봉 데이터 제공자
//! - 유니버스 파일 로더
//! - 결과 JSON 원자적 저장
//! - Git 자동 게시

pub mod error;
pub mod provider;
pub mod publish;
pub mod storage;
pub mod universe;

pub use error::{DataError, Result};
pub use provider::{
    CsvDirectoryProvider, FixtureInstrument, InMemoryProvider, JsonFixtureProvider,
};
pub use publish::{commit_message, GitOutcome, GitPublisher, PublishReport, ResultPublisher};
pub use storage::{render_artifact, write_artifact};
pub use universe::{load_universe, validate_universe};
