//! 스크리너의 에러 타입.
//!
//! 종목 단위 데이터 문제(`DataUnavailable`)는 오케스트레이터 경계에서 로그로만
//! 남고 해당 종목을 건너뛰게 되며, 실행 전체를 중단시키는 것은 설정 에러뿐입니다.
//! 잘못된 날짜 키(`MalformedDateError`)는 그 봉만 제외됩니다.

use thiserror::Error;

/// 봉의 날짜 키를 기대한 형식으로 파싱하지 못함.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("잘못된 날짜 키 '{key}' (기대 형식: {expected})")]
pub struct MalformedDateError {
    /// 원본 날짜 키
    pub key: String,
    /// 기대한 형식 설명
    pub expected: &'static str,
}

/// 핵심 스크리너 에러.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// 설정 에러 (실행 전체 중단)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 조회 실패 또는 데이터 부족
    #[error("데이터 없음 [{code}]: {reason}")]
    DataUnavailable { code: String, reason: String },
}

/// 스크리너 작업을 위한 Result 타입.
pub type ScreenerResult<T> = Result<T, ScreenerError>;

impl ScreenerError {
    /// 데이터 부족 에러를 생성합니다.
    pub fn data_unavailable(code: impl Into<String>, reason: impl Into<String>) -> Self {
        ScreenerError::DataUnavailable {
            code: code.into(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for ScreenerError {
    fn from(err: config::ConfigError) -> Self {
        ScreenerError::Config(err.to_string())
    }
}
