//! TrendRegime - 월봉 이동평균 기반 추세 분류.
//!
//! 단기 평균과 장기 평균의 대소 관계로 종목의 추세를 3단계로 분류합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 단기/장기 이동평균 비교로 얻은 추세 레짐.
///
/// # 상태 설명
///
/// - **Uptrend**: 단기 평균 > 장기 평균
/// - **Flat**: 단기 평균 == 장기 평균
/// - **Downtrend**: 단기 평균 < 장기 평균
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendRegime {
    /// 상승 추세
    Uptrend,

    /// 보합
    #[default]
    Flat,

    /// 하락 추세
    Downtrend,
}

impl TrendRegime {
    /// 단기/장기 평균에서 레짐을 결정합니다.
    pub fn from_averages(short_avg: Decimal, long_avg: Decimal) -> Self {
        match short_avg.cmp(&long_avg) {
            std::cmp::Ordering::Greater => Self::Uptrend,
            std::cmp::Ordering::Equal => Self::Flat,
            std::cmp::Ordering::Less => Self::Downtrend,
        }
    }

    /// 하락 추세 여부
    pub fn is_downtrend(self) -> bool {
        matches!(self, Self::Downtrend)
    }
}

impl fmt::Display for TrendRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uptrend => "UPTREND",
            Self::Flat => "FLAT",
            Self::Downtrend => "DOWNTREND",
        };
        write!(f, "{}", s)
    }
}
