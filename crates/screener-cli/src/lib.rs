//! 스크리너 CLI 명령 모음.
//!
//! - `run`: 유니버스 스크리닝 후 결과 파일 게시
//! - `inspect`: 한 종목의 판정기별 진단
//! - `universe`: 스크리닝 대상 종목 출력

pub mod commands;

pub use commands::*;
