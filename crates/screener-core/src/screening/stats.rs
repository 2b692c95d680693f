//! 스크리닝 실행 통계.

use serde::Serialize;
use std::time::Duration;

use super::engine::SkipReason;

/// 한 번의 스크리닝 실행 통계.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// 판정한 종목 수
    pub evaluated: usize,
    /// 모든 조건을 통과한 종목 수
    pub passed: usize,
    /// 데이터 조회 실패
    pub fetch_failed: usize,
    /// 데이터 부족
    pub insufficient_data: usize,
    /// 꼬리 우상향 탈락
    pub pattern_rejected: usize,
    /// 바닥 2회 탈락
    pub support_rejected: usize,
    /// 추세 탈락
    pub regime_rejected: usize,
    /// 하락률 거부
    pub drawdown_vetoed: usize,
    /// 날짜 키 오류로 제외된 봉 수
    pub malformed_bars: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 통과 종목 기록
    pub fn record_pass(&mut self) {
        self.evaluated += 1;
        self.passed += 1;
    }

    /// 탈락 종목을 사유별로 기록
    pub fn record_skip(&mut self, reason: &SkipReason) {
        self.evaluated += 1;
        match reason {
            SkipReason::FetchFailed { .. } => self.fetch_failed += 1,
            SkipReason::InsufficientData { .. } => self.insufficient_data += 1,
            SkipReason::Pattern { .. } => self.pattern_rejected += 1,
            SkipReason::Support { .. } => self.support_rejected += 1,
            SkipReason::Regime { .. } => self.regime_rejected += 1,
            SkipReason::DrawdownVeto { .. } => self.drawdown_vetoed += 1,
        }
    }

    /// 탈락 종목 수
    pub fn skipped(&self) -> usize {
        self.evaluated - self.passed
    }

    /// 통과율 계산 (%)
    pub fn pass_rate(&self) -> f64 {
        if self.evaluated == 0 {
            0.0
        } else {
            (self.passed as f64 / self.evaluated as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, cancelled: bool) {
        tracing::info!(
            evaluated = self.evaluated,
            passed = self.passed,
            fetch_failed = self.fetch_failed,
            insufficient_data = self.insufficient_data,
            pattern_rejected = self.pattern_rejected,
            support_rejected = self.support_rejected,
            regime_rejected = self.regime_rejected,
            drawdown_vetoed = self.drawdown_vetoed,
            malformed_bars = self.malformed_bars,
            pass_rate = format!("{:.1}%", self.pass_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            cancelled,
            "스크리닝 완료"
        );
    }
}
