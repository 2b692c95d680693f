//! 종목, 종목 시계열, 스크리닝 결과 타입.

use super::bar::{DailyBar, MonthlyBar};
use crate::types::Price;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// 스크리닝 유니버스의 종목 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// 종목명
    pub name: String,
    /// 종목 코드 (예: 005930)
    pub code: String,
}

impl Instrument {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.code)
    }
}

/// 한 종목의 정규화된 일봉/월봉 시계열.
///
/// 스크리닝 실행마다 종목별로 새로 만들어지고 판정이 끝나면 버려집니다.
#[derive(Debug, Clone)]
pub struct InstrumentSeries {
    /// 종목 코드
    pub code: String,
    /// 종목명
    pub name: String,
    /// 일봉 (오래된 것부터)
    pub daily: Vec<DailyBar>,
    /// 월봉 (오래된 것부터)
    pub monthly: Vec<MonthlyBar>,
}

impl InstrumentSeries {
    /// 가장 최근 일봉 종가.
    pub fn latest_close(&self) -> Option<Price> {
        self.daily.last().map(|bar| bar.close)
    }
}

/// 모든 조건을 통과한 종목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    /// 종목명
    pub name: String,
    /// 종목 코드
    pub code: String,
    /// 판정에 사용된 최신 종가
    #[serde(serialize_with = "serialize_price")]
    pub price: Price,
}

impl ScreeningResult {
    pub fn new(instrument: &Instrument, price: Price) -> Self {
        Self {
            name: instrument.name.clone(),
            code: instrument.code.clone(),
            price,
        }
    }
}

/// 가격을 JSON 숫자로 직렬화합니다 (정수 가격은 정수로).
fn serialize_price<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let normalized = price.normalize();
    if normalized.scale() == 0 {
        if let Some(whole) = normalized.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match normalized.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => Err(serde::ser::Error::custom(format!(
            "price {} is not representable as a JSON number",
            price
        ))),
    }
}
