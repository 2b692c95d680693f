//! # Screener Core
//!
//! 캔들스틱 패턴 스크리너의 핵심 도메인 모델과 스크리닝 엔진을 제공합니다.
//!
//! 이 크레이트는 다음을 포함합니다:
//! - 일봉/월봉 및 종목 시계열 타입
//! - 봉 데이터 정규화 (날짜 파싱, 안정 정렬)
//! - 꼬리 우상향, 바닥 2회, 추세 레짐 판정기
//! - 종목 유니버스를 순회하는 스크리닝 오케스트레이터
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod screening;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use screening::*;
pub use types::*;
