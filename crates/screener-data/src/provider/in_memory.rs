//! 메모리 기반 봉 데이터 제공자.
//!
//! 테스트와 임베딩용입니다. 종목별로 데이터 또는 실패를 등록할 수 있습니다.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use screener_core::{BarProvider, DailyBarRecord, MonthlyBarRecord, ProviderError};

#[derive(Debug, Clone)]
enum Entry {
    Bars {
        daily: Vec<DailyBarRecord>,
        monthly: Vec<MonthlyBarRecord>,
    },
    Failure(String),
}

/// 메모리 제공자.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    entries: HashMap<String, Entry>,
    calls: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 종목 데이터를 등록합니다.
    pub fn with_bars(
        mut self,
        code: impl Into<String>,
        daily: Vec<DailyBarRecord>,
        monthly: Vec<MonthlyBarRecord>,
    ) -> Self {
        self.entries.insert(code.into(), Entry::Bars { daily, monthly });
        self
    }

    /// 조회할 때마다 실패하는 종목을 등록합니다.
    pub fn with_failure(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.entries.insert(code.into(), Entry::Failure(message.into()));
        self
    }

    /// 지금까지의 조회 횟수.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn lookup(
        &self,
        code: &str,
    ) -> Result<(&[DailyBarRecord], &[MonthlyBarRecord]), ProviderError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match self.entries.get(code) {
            Some(Entry::Bars { daily, monthly }) => Ok((daily.as_slice(), monthly.as_slice())),
            Some(Entry::Failure(message)) => Err(ProviderError::Other(message.clone())),
            None => Err(ProviderError::NotFound(code.to_string())),
        }
    }
}

#[async_trait]
impl BarProvider for InMemoryProvider {
    async fn fetch_daily(&self, code: &str) -> Result<Vec<DailyBarRecord>, ProviderError> {
        self.lookup(code).map(|(daily, _)| daily.to_vec())
    }

    async fn fetch_monthly(&self, code: &str) -> Result<Vec<MonthlyBarRecord>, ProviderError> {
        self.lookup(code).map(|(_, monthly)| monthly.to_vec())
    }

    fn provider_name(&self) -> &str {
        "in-memory"
    }
}
