//! CSV 디렉토리 기반 봉 데이터 제공자.
//!
//! 종목마다 두 개의 파일을 읽습니다:
//! - `<dir>/<code>_daily.csv`: `date,open,high,low,close,volume` (volume은 비어 있어도 됨)
//! - `<dir>/<code>_monthly.csv`: `date,close`

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use screener_core::{BarProvider, DailyBarRecord, MonthlyBarRecord, ProviderError};

/// CSV 디렉토리 제공자.
#[derive(Debug, Clone)]
pub struct CsvDirectoryProvider {
    root: PathBuf,
}

impl CsvDirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 일봉 파일 경로
    pub fn daily_path(&self, code: &str) -> PathBuf {
        self.root.join(format!("{}_daily.csv", code))
    }

    /// 월봉 파일 경로
    pub fn monthly_path(&self, code: &str) -> PathBuf {
        self.root.join(format!("{}_monthly.csv", code))
    }

    async fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ProviderError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProviderError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(ProviderError::Io(format!("{}: {}", path.display(), e))),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        reader
            .deserialize()
            .collect::<Result<Vec<T>, csv::Error>>()
            .map_err(|e| ProviderError::Parse(format!("{}: {}", path.display(), e)))
    }
}

#[async_trait]
impl BarProvider for CsvDirectoryProvider {
    async fn fetch_daily(&self, code: &str) -> Result<Vec<DailyBarRecord>, ProviderError> {
        Self::read_records(&self.daily_path(code)).await
    }

    async fn fetch_monthly(&self, code: &str) -> Result<Vec<MonthlyBarRecord>, ProviderError> {
        Self::read_records(&self.monthly_path(code)).await
    }

    fn provider_name(&self) -> &str {
        "csv-directory"
    }
}
