//! 스크리닝 엔진.
//!
//! - `normalizer`: 날짜 키 파싱과 시간 순 안정 정렬
//! - `pattern`: 꼬리 우상향 판정
//! - `support`: 바닥 2회 판정
//! - `regime`: 월봉 이동평균 추세 판정 (하락률 거부 포함)
//! - `engine`: 유니버스 순회 및 결과 집계
//! - `stats`: 실행 통계

pub mod engine;
pub mod normalizer;
pub mod pattern;
pub mod regime;
pub mod stats;
pub mod support;

pub use engine::{
    InspectionReport, InstrumentOutcome, ScreeningEngine, ScreeningRun, SeriesKind, SkipReason,
};
pub use normalizer::{normalize_daily, normalize_monthly, sort_chronologically, Normalized};
pub use pattern::{TailPatternCheck, TailPatternDetector, TailPatternParams, MIN_PATTERN_BARS};
pub use regime::{RegimeClassifier, RegimeParams, RegimeVerdict, TrendMode};
pub use stats::RunStats;
pub use support::{PriceField, SupportCheck, SupportDetector, SupportParams};
