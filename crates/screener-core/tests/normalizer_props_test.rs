//! 정규화 속성 테스트
//!
//! 유효한 봉 집합에 대해 정규화가 멱등이고 입력 순서에 무관한지 검증.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use screener_core::{
    normalize_daily, normalize_monthly, DailyBar, DailyBarRecord, MonthlyBarRecord,
};

/// 서로 다른 거래일을 가진 일봉 레코드 (두 가지 날짜 키 형식 혼용)
fn daily_records() -> impl Strategy<Value = Vec<DailyBarRecord>> {
    prop::collection::btree_set(0i64..2000, 0..40).prop_flat_map(|offsets| {
        let len = offsets.len();
        (
            Just(offsets.into_iter().collect::<Vec<_>>()),
            prop::collection::vec((1_000u32..200_000, 0u32..5_000, any::<bool>()), len..=len),
        )
            .prop_map(|(offsets, fields)| {
                let base = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
                offsets
                    .into_iter()
                    .zip(fields)
                    .map(|(offset, (low, spread, dashed))| {
                        let date = base + Duration::days(offset);
                        let key = if dashed {
                            date.format("%Y-%m-%d").to_string()
                        } else {
                            date.format("%Y%m%d").to_string()
                        };
                        let low = Decimal::from(low);
                        let high = low + Decimal::from(spread);
                        DailyBarRecord {
                            date: key,
                            open: low,
                            high,
                            low,
                            close: high,
                            volume: None,
                        }
                    })
                    .collect::<Vec<_>>()
            })
    })
}

fn to_records(bars: &[DailyBar]) -> Vec<DailyBarRecord> {
    bars.iter()
        .map(|bar| DailyBarRecord {
            date: bar.date.format("%Y%m%d").to_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_daily_normalize_is_idempotent(records in daily_records()) {
        let once = normalize_daily(records);
        prop_assert!(once.rejected.is_empty());

        let twice = normalize_daily(to_records(&once.bars));
        prop_assert_eq!(&once.bars, &twice.bars);
    }

    #[test]
    fn prop_daily_normalize_ignores_input_order(
        (records, shuffled) in daily_records().prop_flat_map(|records| {
            let shuffled = Just(records.clone()).prop_shuffle();
            (Just(records), shuffled)
        })
    ) {
        let expected = normalize_daily(records);
        let actual = normalize_daily(shuffled);
        prop_assert_eq!(expected.bars, actual.bars);
    }

    #[test]
    fn prop_daily_output_is_sorted(records in daily_records()) {
        let bars = normalize_daily(records).bars;
        prop_assert!(bars.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn prop_monthly_normalize_ignores_input_order(
        months in prop::collection::btree_set(0u32..120, 0..24)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    ) {
        let records: Vec<MonthlyBarRecord> = months
            .iter()
            .map(|m| MonthlyBarRecord {
                date: format!("{}{:02}", 2015 + m / 12, m % 12 + 1),
                close: Decimal::from(*m),
            })
            .collect();
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = normalize_monthly(records).bars;
        let backward = normalize_monthly(reversed).bars;
        prop_assert_eq!(forward.len(), months.len());
        prop_assert_eq!(&forward, &backward);
        prop_assert!(forward.windows(2).all(|w| w[0].period < w[1].period));
    }
}
