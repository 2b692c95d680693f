//! 바닥 2회 판정.
//!
//! 최근 `window`개 일봉에서 선택한 가격(저가 또는 종가)의 최솟값을 구하고,
//! 최솟값의 `(1 + tolerance)` 배 이하인 값이 `min_count`개 이상이면 통과합니다.
//! 최솟값 자신도 개수에 포함됩니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::DailyBar;
use crate::error::{ScreenerError, ScreenerResult};
use crate::types::{Price, Ratio};

/// 바닥 판정에 사용할 가격 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    /// 저가
    #[default]
    Low,
    /// 종가
    Close,
}

impl PriceField {
    /// 봉에서 선택한 가격을 꺼냅니다.
    pub fn select(self, bar: &DailyBar) -> Price {
        match self {
            PriceField::Low => bar.low,
            PriceField::Close => bar.close,
        }
    }
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceField::Low => write!(f, "low"),
            PriceField::Close => write!(f, "close"),
        }
    }
}

/// 바닥 2회 판정 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportParams {
    /// 검사할 최근 일봉 수
    pub window: usize,
    /// 최솟값 대비 허용 오차
    pub tolerance: Ratio,
    /// 통과에 필요한 바닥 터치 수
    pub min_count: usize,
    /// 사용할 가격 필드
    pub field: PriceField,
}

impl Default for SupportParams {
    fn default() -> Self {
        Self {
            window: 20,
            tolerance: dec!(0.02),
            min_count: 2,
            field: PriceField::Low,
        }
    }
}

impl SupportParams {
    pub fn validate(&self) -> ScreenerResult<()> {
        if self.window == 0 {
            return Err(ScreenerError::Config(
                "support.window must be greater than zero".to_string(),
            ));
        }
        if self.tolerance < Decimal::ZERO {
            return Err(ScreenerError::Config(format!(
                "support.tolerance must not be negative (got {})",
                self.tolerance
            )));
        }
        if self.min_count == 0 || self.min_count > self.window {
            return Err(ScreenerError::Config(format!(
                "support.min_count must be within 1..={} (got {})",
                self.window, self.min_count
            )));
        }
        Ok(())
    }
}

/// 바닥 2회 판정 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportCheck {
    /// 검사한 값의 수
    pub examined: usize,
    /// 구간 최솟값 (값이 없으면 None)
    pub floor: Option<Price>,
    /// 바닥으로 인정하는 상한
    pub threshold: Option<Price>,
    /// 상한 이하인 값의 수
    pub touches: usize,
    /// 통과에 필요한 수
    pub required: usize,
    /// 통과 여부
    pub passed: bool,
}

/// 바닥 2회 판정기.
#[derive(Debug, Clone, Default)]
pub struct SupportDetector {
    params: SupportParams,
}

impl SupportDetector {
    pub fn new(params: SupportParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SupportParams {
        &self.params
    }

    /// 시간 순으로 정렬된 일봉 시계열을 판정합니다.
    pub fn evaluate(&self, bars: &[DailyBar]) -> SupportCheck {
        let start = bars.len().saturating_sub(self.params.window);
        let values: Vec<Price> = bars[start..]
            .iter()
            .map(|bar| self.params.field.select(bar))
            .collect();

        let required = self.params.min_count;
        let floor = values.iter().copied().min();

        let (threshold, touches) = match floor {
            Some(floor) if values.len() >= required => {
                let threshold = floor * (Decimal::ONE + self.params.tolerance);
                let touches = values.iter().filter(|v| **v <= threshold).count();
                (Some(threshold), touches)
            }
            _ => (None, 0),
        };

        SupportCheck {
            examined: values.len(),
            floor,
            threshold,
            touches,
            required,
            passed: values.len() >= required && touches >= required,
        }
    }

    /// 통과 여부만 반환합니다.
    pub fn is_satisfied(&self, bars: &[DailyBar]) -> bool {
        self.evaluate(bars).passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar_with(low: Price, close: Price) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            open: close,
            high: close.max(low),
            low,
            close,
            volume: None,
        }
    }

    fn lows(values: &[Price]) -> Vec<DailyBar> {
        values.iter().map(|v| bar_with(*v, *v + dec!(5))).collect()
    }

    #[test]
    fn test_tolerance_edge() {
        let detector = SupportDetector::default();
        // 최솟값 100, 상한 102
        let check = detector.evaluate(&lows(&[dec!(100), dec!(130), dec!(102)]));
        assert_eq!(check.threshold, Some(dec!(102.00)));
        assert_eq!(check.touches, 2);
        assert!(check.passed);

        let check = detector.evaluate(&lows(&[dec!(100), dec!(130), dec!(102.01)]));
        assert_eq!(check.touches, 1);
        assert!(!check.passed);
    }

    #[test]
    fn test_fewer_values_than_required_is_false() {
        let detector = SupportDetector::default();
        let check = detector.evaluate(&lows(&[dec!(100)]));
        assert_eq!(check.examined, 1);
        assert!(!check.passed);
        assert!(!detector.is_satisfied(&[]));
    }

    #[test]
    fn test_close_field_selector() {
        let detector = SupportDetector::new(SupportParams {
            field: PriceField::Close,
            ..Default::default()
        });
        // 저가는 한 번만 바닥, 종가는 두 번 바닥
        let bars = vec![
            bar_with(dec!(90), dec!(100)),
            bar_with(dec!(120), dec!(101)),
            bar_with(dec!(125), dec!(140)),
        ];
        assert!(detector.is_satisfied(&bars));
        assert!(!SupportDetector::default().is_satisfied(&bars));
    }

    #[test]
    fn test_price_field_serde() {
        let field: PriceField = serde_json::from_str("\"close\"").unwrap();
        assert_eq!(field, PriceField::Close);
        assert_eq!(serde_json::to_string(&PriceField::Low).unwrap(), "\"low\"");
    }

    #[test]
    fn test_validate() {
        assert!(SupportParams::default().validate().is_ok());
        let params = SupportParams {
            min_count: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
