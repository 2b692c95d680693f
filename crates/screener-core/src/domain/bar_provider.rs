//! 봉 데이터 제공자 추상화.
//!
//! 스크리닝 엔진은 증권사 세션이나 파일 등 구체적인 데이터 소스를 알지 못하고
//! 이 trait를 통해서만 일봉/월봉을 조회합니다. 콜백 기반 증권사 API를
//! 요청-응답 형태로 감싸는 일은 각 구현체의 책임입니다.

use async_trait::async_trait;
use thiserror::Error;

use super::bar::{DailyBarRecord, MonthlyBarRecord};

// =============================================================================
// 에러 타입
// =============================================================================

/// BarProvider 에러.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 해당 종목 데이터 없음
    #[error("데이터 없음: {0}")]
    NotFound(String),

    /// 데이터 소스 I/O 에러
    #[error("I/O 에러: {0}")]
    Io(String),

    /// 파싱 에러
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// 응답 시간 초과
    #[error("응답 시간 초과: {0}")]
    Timeout(String),

    /// 기타 에러
    #[error("기타 에러: {0}")]
    Other(String),
}

// =============================================================================
// BarProvider Trait
// =============================================================================

/// 종목별 일봉/월봉 제공자 trait.
///
/// 반환되는 레코드는 정렬이 보장되지 않으며 날짜 키도 파싱 전 문자열입니다.
/// 빈 결과, 에러, 타임아웃은 엔진에서 모두 "조회 실패"로 취급됩니다.
///
/// # 구현 예시
///
/// ```ignore
/// pub struct BrokerProvider {
///     session: Arc<BrokerSession>,
/// }
///
/// #[async_trait]
/// impl BarProvider for BrokerProvider {
///     async fn fetch_daily(&self, code: &str) -> Result<Vec<DailyBarRecord>, ProviderError> {
///         // TR 요청 후 응답 이벤트를 기다려 레코드로 변환
///     }
///
///     // ... 나머지 메서드 구현
/// }
/// ```
#[async_trait]
pub trait BarProvider: Send + Sync {
    /// 일봉 조회.
    ///
    /// # Errors
    ///
    /// - `ProviderError::NotFound`: 종목 데이터가 없음
    /// - `ProviderError::Io`: 데이터 소스 접근 실패
    /// - `ProviderError::Parse`: 응답 형식 오류
    async fn fetch_daily(&self, code: &str) -> Result<Vec<DailyBarRecord>, ProviderError>;

    /// 월봉 조회.
    ///
    /// # Errors
    ///
    /// `fetch_daily`와 동일합니다.
    async fn fetch_monthly(&self, code: &str) -> Result<Vec<MonthlyBarRecord>, ProviderError>;

    /// 제공자 이름 반환.
    ///
    /// 로깅 및 디버깅 목적으로 사용됩니다.
    fn provider_name(&self) -> &str;
}

// =============================================================================
// 테스트
// =============================================================================
