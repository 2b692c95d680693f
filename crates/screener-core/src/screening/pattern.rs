//! 꼬리 우상향 캔들 판정.
//!
//! 최근 `window`개 일봉 중 아래 꼬리가 긴 양봉이 `min_count`개 이상이면 통과합니다.
//!
//! 한 봉이 조건을 만족하려면:
//! - 양봉 (`open < close`)
//! - 범위가 0보다 큼 (`high > low`)
//! - `(open - low) / (high - low) >= tail_ratio`

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::DailyBar;
use crate::error::{ScreenerError, ScreenerResult};
use crate::types::Ratio;

/// 판정에 필요한 최소 일봉 수.
pub const MIN_PATTERN_BARS: usize = 3;

/// 꼬리 우상향 판정 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailPatternParams {
    /// 검사할 최근 일봉 수
    pub window: usize,
    /// 최소 아래 꼬리 비율
    pub tail_ratio: Ratio,
    /// 통과에 필요한 최소 봉 수
    pub min_count: usize,
}

impl Default for TailPatternParams {
    fn default() -> Self {
        Self {
            window: 20,
            tail_ratio: dec!(0.30),
            min_count: 3,
        }
    }
}

impl TailPatternParams {
    pub fn validate(&self) -> ScreenerResult<()> {
        if self.window < MIN_PATTERN_BARS {
            return Err(ScreenerError::Config(format!(
                "pattern.window must be at least {} (got {})",
                MIN_PATTERN_BARS, self.window
            )));
        }
        if self.tail_ratio < Decimal::ZERO || self.tail_ratio > Decimal::ONE {
            return Err(ScreenerError::Config(format!(
                "pattern.tail_ratio must be within [0, 1] (got {})",
                self.tail_ratio
            )));
        }
        if self.min_count == 0 {
            return Err(ScreenerError::Config(
                "pattern.min_count must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// 꼬리 우상향 판정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TailPatternCheck {
    /// 검사한 봉 수
    pub examined: usize,
    /// 조건을 만족한 봉 수
    pub matches: usize,
    /// 통과에 필요한 봉 수
    pub required: usize,
    /// 통과 여부
    pub passed: bool,
}

/// 꼬리 우상향 판정기.
#[derive(Debug, Clone, Default)]
pub struct TailPatternDetector {
    params: TailPatternParams,
}

impl TailPatternDetector {
    pub fn new(params: TailPatternParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TailPatternParams {
        &self.params
    }

    /// 한 봉이 꼬리 우상향 조건을 만족하는지 확인합니다.
    pub fn is_tail_upward(&self, bar: &DailyBar) -> bool {
        let range = bar.range();
        // 범위가 0인 봉은 비율을 정의할 수 없으므로 제외
        if range <= Decimal::ZERO || !bar.is_bullish() {
            return false;
        }
        // 나눗셈 대신 곱셈으로 비교해 반올림 오차를 피함
        bar.open_to_low() >= range * self.params.tail_ratio
    }

    /// 시간 순으로 정렬된 일봉 시계열을 판정합니다.
    pub fn evaluate(&self, bars: &[DailyBar]) -> TailPatternCheck {
        let start = bars.len().saturating_sub(self.params.window);
        let recent = &bars[start..];

        let matches = if recent.len() < MIN_PATTERN_BARS {
            0
        } else {
            recent.iter().filter(|bar| self.is_tail_upward(bar)).count()
        };

        TailPatternCheck {
            examined: recent.len(),
            matches,
            required: self.params.min_count,
            passed: recent.len() >= MIN_PATTERN_BARS && matches >= self.params.min_count,
        }
    }

    /// 통과 여부만 반환합니다.
    pub fn is_satisfied(&self, bars: &[DailyBar]) -> bool {
        self.evaluate(bars).passed
    }
}
