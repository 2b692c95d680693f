//! 월봉 기간을 나타내는 연-월 타입.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 달력상의 연-월 (월봉 기간).
///
/// 필드 선언 순서(연 → 월)대로 정렬됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// 연-월을 생성합니다. 월이 1~12 범위를 벗어나면 `None`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// 날짜가 속한 연-월.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    /// `YYYY-MM` 또는 `YYYYMM` 형식을 파싱합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() {
            return Err(format!("Invalid year-month: {}", s));
        }
        let (year, month) = match s.len() {
            7 if s.as_bytes()[4] == b'-' => (&s[..4], &s[5..]),
            6 => (&s[..4], &s[4..]),
            _ => return Err(format!("Invalid year-month: {}", s)),
        };
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(format!("Invalid year-month: {}", s));
        }
        let year: i32 = year.parse().map_err(|_| format!("Invalid year-month: {}", s))?;
        let month: u32 = month.parse().map_err(|_| format!("Invalid year-month: {}", s))?;
        Self::new(year, month).ok_or_else(|| format!("Invalid month in year-month: {}", s))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let expected = YearMonth::new(2024, 3).unwrap();
        assert_eq!("2024-03".parse::<YearMonth>().unwrap(), expected);
        assert_eq!("202403".parse::<YearMonth>().unwrap(), expected);
        assert_eq!(" 202403 ".parse::<YearMonth>().unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024/03".parse::<YearMonth>().is_err());
        assert!("24-03".parse::<YearMonth>().is_err());
        assert!("20240".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_ordering_and_display() {
        let dec = YearMonth::new(2023, 12).unwrap();
        let jan = YearMonth::new(2024, 1).unwrap();
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2024-01");
    }
}
