//! 가격 계산을 위한 Decimal 유틸리티.
//!
//! 허용 오차 비교(예: 저점 대비 +2%)가 부동소수점 오차 없이 정확히
//! 동작하도록 모든 가격은 `Decimal`로 다룹니다.

use rust_decimal::Decimal;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 비율 타입 (0.02 = 2%).
pub type Ratio = Decimal;

/// 산술 평균. 빈 슬라이스는 `None`.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().copied().sum();
    Some(sum / Decimal::from(values.len()))
}
