//! 월봉 이동평균 추세 판정.
//!
//! 최근 `short_window`개월 평균과 `long_window`개월 평균을 비교합니다.
//! 하락률 거부가 켜져 있으면 최근 `long_window`개월 고점 대비 현재 종가의
//! 하락률이 `drawdown_threshold` 이상일 때 평균과 관계없이 탈락시킵니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::{MonthlyBar, TrendRegime};
use crate::error::{ScreenerError, ScreenerResult};
use crate::types::{mean, Price, Ratio};

/// 추세 판정 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendMode {
    /// 단기 평균 > 장기 평균일 때만 통과
    #[default]
    UptrendRequired,
    /// 단기 평균 < 장기 평균(하락 추세)만 탈락
    DowntrendExclusion,
}

impl TrendMode {
    /// 레짐이 이 방식에서 통과인지 확인합니다.
    pub fn accepts(self, regime: TrendRegime) -> bool {
        match self {
            TrendMode::UptrendRequired => regime == TrendRegime::Uptrend,
            TrendMode::DowntrendExclusion => !regime.is_downtrend(),
        }
    }
}

/// 추세 판정 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeParams {
    /// 단기 평균 개월 수
    pub short_window: usize,
    /// 장기 평균 개월 수
    pub long_window: usize,
    /// 판정 방식
    pub mode: TrendMode,
    /// 하락률 거부 사용 여부
    pub drawdown_veto: bool,
    /// 하락률 거부 기준
    pub drawdown_threshold: Ratio,
}

impl Default for RegimeParams {
    fn default() -> Self {
        Self {
            short_window: 3,
            long_window: 6,
            mode: TrendMode::UptrendRequired,
            drawdown_veto: true,
            drawdown_threshold: dec!(0.50),
        }
    }
}

impl RegimeParams {
    pub fn validate(&self) -> ScreenerResult<()> {
        if self.short_window == 0 {
            return Err(ScreenerError::Config(
                "regime.short_window must be greater than zero".to_string(),
            ));
        }
        if self.short_window >= self.long_window {
            return Err(ScreenerError::Config(format!(
                "regime.short_window ({}) must be less than regime.long_window ({})",
                self.short_window, self.long_window
            )));
        }
        if self.drawdown_threshold <= Decimal::ZERO || self.drawdown_threshold > Decimal::ONE {
            return Err(ScreenerError::Config(format!(
                "regime.drawdown_threshold must be within (0, 1] (got {})",
                self.drawdown_threshold
            )));
        }
        Ok(())
    }
}

/// 추세 판정 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum RegimeVerdict {
    /// 월봉 수 부족
    InsufficientData { available: usize, required: usize },
    /// 고점 대비 하락률이 기준 이상
    DrawdownVeto {
        drawdown: Ratio,
        peak: Price,
        current: Price,
    },
    /// 이동평균 비교 결과
    Trend {
        short_avg: Price,
        long_avg: Price,
        drawdown: Ratio,
        regime: TrendRegime,
        passed: bool,
    },
}

impl RegimeVerdict {
    /// 통과 여부
    pub fn passed(&self) -> bool {
        matches!(self, RegimeVerdict::Trend { passed: true, .. })
    }
}

/// 추세 판정기.
#[derive(Debug, Clone, Default)]
pub struct RegimeClassifier {
    params: RegimeParams,
}

impl RegimeClassifier {
    pub fn new(params: RegimeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RegimeParams {
        &self.params
    }

    /// 고점 대비 하락률을 계산합니다. 고점이 0 이하이면 0으로 봅니다.
    pub fn drawdown(peak: Price, current: Price) -> Ratio {
        if peak <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (peak - current) / peak
    }

    /// 시간 순으로 정렬된 월봉 시계열을 판정합니다.
    pub fn classify(&self, bars: &[MonthlyBar]) -> RegimeVerdict {
        let required = self.params.long_window;
        if bars.len() < required || required == 0 {
            return RegimeVerdict::InsufficientData {
                available: bars.len(),
                required,
            };
        }

        let closes: Vec<Price> = bars[bars.len() - required..]
            .iter()
            .map(|bar| bar.close)
            .collect();

        let peak = closes.iter().copied().max().unwrap_or_default();
        let current = closes.last().copied().unwrap_or_default();
        let drawdown = Self::drawdown(peak, current);

        if self.params.drawdown_veto && drawdown >= self.params.drawdown_threshold {
            return RegimeVerdict::DrawdownVeto {
                drawdown,
                peak,
                current,
            };
        }

        let short_start = closes.len().saturating_sub(self.params.short_window);
        let short_avg = mean(&closes[short_start..]).unwrap_or_default();
        let long_avg = mean(&closes).unwrap_or_default();
        let regime = TrendRegime::from_averages(short_avg, long_avg);

        RegimeVerdict::Trend {
            short_avg,
            long_avg,
            drawdown,
            regime,
            passed: self.params.mode.accepts(regime),
        }
    }

    /// 통과 여부만 반환합니다.
    pub fn is_satisfied(&self, bars: &[MonthlyBar]) -> bool {
        self.classify(bars).passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::YearMonth;

    fn monthly(closes: &[Decimal]) -> Vec<MonthlyBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| MonthlyBar {
                period: YearMonth::new(2024, i as u32 + 1).unwrap(),
                close: *close,
            })
            .collect()
    }

    #[test]
    fn test_insufficient_data() {
        let classifier = RegimeClassifier::default();
        let verdict = classifier.classify(&monthly(&[dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]));
        assert_eq!(
            verdict,
            RegimeVerdict::InsufficientData {
                available: 5,
                required: 6
            }
        );
        assert!(!verdict.passed());
    }

    #[test]
    fn test_flat_series_depends_on_mode() {
        let bars = monthly(&[dec!(100); 6]);
        assert!(!RegimeClassifier::default().is_satisfied(&bars));

        let exclusion = RegimeClassifier::new(RegimeParams {
            mode: TrendMode::DowntrendExclusion,
            ..Default::default()
        });
        assert!(exclusion.is_satisfied(&bars));
    }

    #[test]
    fn test_downtrend_excluded_in_both_modes() {
        let bars = monthly(&[dec!(120), dec!(118), dec!(115), dec!(110), dec!(105), dec!(100)]);
        let exclusion = RegimeClassifier::new(RegimeParams {
            mode: TrendMode::DowntrendExclusion,
            ..Default::default()
        });
        match exclusion.classify(&bars) {
            RegimeVerdict::Trend { regime, passed, .. } => {
                assert_eq!(regime, TrendRegime::Downtrend);
                assert!(!passed);
            }
            other => panic!("unexpected verdict: {:?}", other),
        }
        assert!(!RegimeClassifier::default().is_satisfied(&bars));
    }

    #[test]
    fn test_zero_peak_is_zero_drawdown() {
        assert_eq!(RegimeClassifier::drawdown(dec!(0), dec!(0)), Decimal::ZERO);
        let verdict = RegimeClassifier::default().classify(&monthly(&[dec!(0); 6]));
        assert!(matches!(verdict, RegimeVerdict::Trend { regime: TrendRegime::Flat, .. }));
    }

    #[test]
    fn test_veto_can_be_disabled() {
        // 상승 추세이지만 고점 대비 60% 하락
        let bars = monthly(&[dec!(90), dec!(90), dec!(90), dec!(250), dec!(250), dec!(100)]);
        assert!(matches!(
            RegimeClassifier::default().classify(&bars),
            RegimeVerdict::DrawdownVeto { .. }
        ));

        let no_veto = RegimeClassifier::new(RegimeParams {
            drawdown_veto: false,
            ..Default::default()
        });
        assert!(no_veto.is_satisfied(&bars));
    }

    #[test]
    fn test_veto_at_exact_threshold() {
        // 고점 200, 현재 100 → 하락률 정확히 50%
        let bars = monthly(&[dec!(100), dec!(100), dec!(100), dec!(200), dec!(200), dec!(100)]);
        match RegimeClassifier::default().classify(&bars) {
            RegimeVerdict::DrawdownVeto {
                drawdown,
                peak,
                current,
            } => {
                assert_eq!(drawdown, dec!(0.5));
                assert_eq!(peak, dec!(200));
                assert_eq!(current, dec!(100));
            }
            other => panic!("unexpected verdict: {:?}", other),
        }

        let bars = monthly(&[dec!(100), dec!(100), dec!(100), dec!(200), dec!(200), dec!(100.02)]);
        assert!(matches!(
            RegimeClassifier::default().classify(&bars),
            RegimeVerdict::Trend { .. }
        ));
    }

    #[test]
    fn test_validate() {
        assert!(RegimeParams::default().validate().is_ok());
        let params = RegimeParams {
            short_window: 6,
            long_window: 6,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(ScreenerError::Config(_))));
    }

    #[test]
    fn test_trend_mode_serde() {
        let mode: TrendMode = serde_json::from_str("\"downtrend-exclusion\"").unwrap();
        assert_eq!(mode, TrendMode::DowntrendExclusion);
    }
}
