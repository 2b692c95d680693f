//! 봉 데이터 정규화.
//!
//! 데이터 소스가 준 레코드의 날짜 키를 파싱하고 오래된 것부터 정렬합니다.
//! 증권사 TR은 최신 데이터부터 내려주고 픽스처는 오래된 것부터 담고 있어
//! 판정기는 항상 이 모듈을 거친 시계열만 받습니다.
//!
//! 날짜 키를 파싱할 수 없는 봉은 그 봉만 제외하고 나머지는 계속 처리합니다.
//! 제외된 봉은 `Normalized::rejected`로 돌려주어 호출자가 기록할 수 있게 합니다.

use chrono::NaiveDate;

use crate::domain::{DailyBar, DailyBarRecord, Dated, MonthlyBar, MonthlyBarRecord};
use crate::error::MalformedDateError;
use crate::types::YearMonth;

const DAILY_FORMATS: [&str; 2] = ["%Y%m%d", "%Y-%m-%d"];
const DAILY_EXPECTED: &str = "YYYYMMDD | YYYY-MM-DD";
const MONTHLY_EXPECTED: &str = "YYYYMM | YYYY-MM | YYYYMMDD | YYYY-MM-DD";

/// 정규화 결과.
#[derive(Debug, Clone)]
pub struct Normalized<B> {
    /// 오래된 것부터 정렬된 봉
    pub bars: Vec<B>,
    /// 날짜 키 파싱에 실패해 제외된 봉
    pub rejected: Vec<MalformedDateError>,
}

/// 일봉 날짜 키를 파싱합니다.
pub fn parse_daily_key(key: &str) -> Result<NaiveDate, MalformedDateError> {
    let trimmed = key.trim();
    DAILY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| MalformedDateError {
            key: key.to_string(),
            expected: DAILY_EXPECTED,
        })
}

/// 월봉 기간 키를 파싱합니다.
///
/// 증권사 월봉 TR은 해당 월의 첫 거래일을 일자 형식으로 주기 때문에
/// 일자 키도 받아서 그 달로 변환합니다.
pub fn parse_month_key(key: &str) -> Result<YearMonth, MalformedDateError> {
    if let Ok(period) = key.parse::<YearMonth>() {
        return Ok(period);
    }
    parse_daily_key(key)
        .map(YearMonth::from_date)
        .map_err(|_| MalformedDateError {
            key: key.to_string(),
            expected: MONTHLY_EXPECTED,
        })
}

/// 봉을 시간 순으로 안정 정렬합니다 (같은 날짜는 원래 순서 유지).
pub fn sort_chronologically<B: Dated>(bars: &mut [B]) {
    bars.sort_by_key(|bar| bar.sort_key());
}

/// 일봉 레코드를 정규화합니다.
pub fn normalize_daily(records: Vec<DailyBarRecord>) -> Normalized<DailyBar> {
    let mut bars = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for record in records {
        match parse_daily_key(&record.date) {
            Ok(date) => bars.push(DailyBar {
                date,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
                volume: record.volume,
            }),
            Err(err) => rejected.push(err),
        }
    }

    sort_chronologically(&mut bars);
    Normalized { bars, rejected }
}

/// 월봉 레코드를 정규화합니다.
pub fn normalize_monthly(records: Vec<MonthlyBarRecord>) -> Normalized<MonthlyBar> {
    let mut bars = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for record in records {
        match parse_month_key(&record.date) {
            Ok(period) => bars.push(MonthlyBar {
                period,
                close: record.close,
            }),
            Err(err) => rejected.push(err),
        }
    }

    sort_chronologically(&mut bars);
    Normalized { bars, rejected }
}
