//! JSON 픽스처 기반 봉 데이터 제공자.
//!
//! 다음 형태의 JSON 문서를 읽습니다:
//!
//! ```json
//! [
//!   {
//!     "name": "삼성전자",
//!     "code": "005930",
//!     "daily_data": [
//!       {"date": "2024-01-15", "open": 75000, "high": 78000, "low": 74500, "close": 77800}
//!     ],
//!     "monthly_data": [{"date": "2023-08", "close": 72000}]
//!   }
//! ]
//! ```
//!
//! 문서의 종목 순서가 그대로 유니버스가 됩니다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use screener_core::{BarProvider, DailyBarRecord, Instrument, MonthlyBarRecord, ProviderError};

use crate::error::{DataError, Result};

/// 픽스처 문서의 종목 항목.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureInstrument {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub daily_data: Vec<DailyBarRecord>,
    #[serde(default)]
    pub monthly_data: Vec<MonthlyBarRecord>,
}

/// JSON 픽스처 제공자.
#[derive(Debug, Clone)]
pub struct JsonFixtureProvider {
    entries: HashMap<String, FixtureInstrument>,
    universe: Vec<Instrument>,
}

impl JsonFixtureProvider {
    /// 픽스처 파일을 읽습니다.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let provider = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            instruments = provider.universe.len(),
            "픽스처 로드 완료"
        );
        Ok(provider)
    }

    /// JSON 문자열에서 생성합니다.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let items: Vec<FixtureInstrument> = serde_json::from_str(content)?;
        Self::from_items(items)
    }

    /// 종목 항목 목록에서 생성합니다. 코드가 중복되면 오류입니다.
    pub fn from_items(items: Vec<FixtureInstrument>) -> Result<Self> {
        let mut entries = HashMap::with_capacity(items.len());
        let mut universe = Vec::with_capacity(items.len());

        for item in items {
            let instrument = Instrument::new(item.name.clone(), item.code.clone());
            if entries.insert(item.code.clone(), item).is_some() {
                return Err(DataError::InvalidData(format!(
                    "duplicate instrument code in fixture: {}",
                    instrument.code
                )));
            }
            universe.push(instrument);
        }

        Ok(Self { entries, universe })
    }

    /// 픽스처에 들어 있는 종목 (문서 순서).
    pub fn universe(&self) -> &[Instrument] {
        &self.universe
    }

    fn entry(&self, code: &str) -> std::result::Result<&FixtureInstrument, ProviderError> {
        self.entries
            .get(code)
            .ok_or_else(|| ProviderError::NotFound(code.to_string()))
    }
}

#[async_trait]
impl BarProvider for JsonFixtureProvider {
    async fn fetch_daily(
        &self,
        code: &str,
    ) -> std::result::Result<Vec<DailyBarRecord>, ProviderError> {
        Ok(self.entry(code)?.daily_data.clone())
    }

    async fn fetch_monthly(
        &self,
        code: &str,
    ) -> std::result::Result<Vec<MonthlyBarRecord>, ProviderError> {
        Ok(self.entry(code)?.monthly_data.clone())
    }

    fn provider_name(&self) -> &str {
        "json-fixture"
    }
}
