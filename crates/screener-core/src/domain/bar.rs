//! 봉(bar) 데이터 타입.
//!
//! 이 모듈은 두 단계의 봉 타입을 정의합니다:
//! - `DailyBarRecord` / `MonthlyBarRecord` - 데이터 소스가 전달한 원본 레코드 (날짜 키가 문자열)
//! - `DailyBar` / `MonthlyBar` - 정규화를 거쳐 날짜가 파싱된 봉

use crate::types::{Price, YearMonth};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 데이터 소스가 반환한 일봉 원본 레코드.
///
/// 증권사 TR은 `YYYYMMDD`, 픽스처/CSV는 `YYYY-MM-DD` 형식의 날짜 키를 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBarRecord {
    /// 일자 키 (파싱 전)
    pub date: String,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

/// 데이터 소스가 반환한 월봉 원본 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBarRecord {
    /// 기간 키 (파싱 전, `YYYYMM` / `YYYY-MM` / 일자 형식)
    pub date: String,
    /// 종가
    pub close: Price,
}

/// 정규화된 일봉.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl DailyBar {
    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Price {
        self.high - self.low
    }

    /// 아래 꼬리 길이(시가 - 저가)를 반환합니다.
    pub fn open_to_low(&self) -> Price {
        self.open - self.low
    }

    /// 양봉(시가 < 종가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.open < self.close
    }
}

/// 정규화된 월봉.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBar {
    /// 기간
    pub period: YearMonth,
    /// 종가
    pub close: Price,
}

/// 시간 순 정렬 키를 가진 봉.
pub trait Dated {
    /// 정렬 키 타입
    type Key: Ord + Copy;

    /// 정렬 키를 반환합니다.
    fn sort_key(&self) -> Self::Key;
}

impl Dated for DailyBar {
    type Key = NaiveDate;

    fn sort_key(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for MonthlyBar {
    type Key = YearMonth;

    fn sort_key(&self) -> YearMonth {
        self.period
    }
}
