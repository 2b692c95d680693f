//! 스크리닝 오케스트레이터.
//!
//! 유니버스의 종목을 순서대로 하나씩 처리합니다:
//!
//! 1. 일봉 조회 → 월봉 조회 (조회마다 타임아웃, 첫 조회를 제외하고 조회 간격 대기)
//! 2. 정규화 후 최소 봉 수 재확인
//! 3. 꼬리 우상향 → 바닥 2회 → 추세 순서로 판정, 처음 실패한 곳에서 중단
//!
//! 한 종목의 실패는 실행 전체를 멈추지 않습니다. 취소 토큰은 종목 사이에서만
//! 확인하므로 진행 중인 종목은 끝까지 처리한 뒤 부분 결과를 반환합니다.

use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument as _;

use super::normalizer::{normalize_daily, normalize_monthly};
use super::pattern::{TailPatternCheck, TailPatternDetector, MIN_PATTERN_BARS};
use super::regime::{RegimeClassifier, RegimeVerdict};
use super::stats::RunStats;
use super::support::{SupportCheck, SupportDetector};
use crate::config::ScreenerConfig;
use crate::domain::{
    BarProvider, Instrument, InstrumentSeries, ProviderError, ScreeningResult, TrendRegime,
};
use crate::error::{ScreenerError, ScreenerResult};
use crate::types::{Price, Ratio};

/// 조회 대상 시계열 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Daily,
    Monthly,
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::Daily => write!(f, "daily"),
            SeriesKind::Monthly => write!(f, "monthly"),
        }
    }
}

/// 종목이 결과에서 빠진 사유.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// 조회 실패, 타임아웃, 빈 응답
    FetchFailed { series: SeriesKind, error: String },
    /// 정규화 후 봉 수 부족
    InsufficientData {
        series: SeriesKind,
        available: usize,
        required: usize,
    },
    /// 꼬리 우상향 탈락
    Pattern { matches: usize, required: usize },
    /// 바닥 2회 탈락
    Support { touches: usize, required: usize },
    /// 추세 탈락
    Regime {
        regime: TrendRegime,
        short_avg: Price,
        long_avg: Price,
    },
    /// 고점 대비 하락률 거부
    DrawdownVeto { drawdown: Ratio },
}

impl SkipReason {
    /// 데이터 문제로 판정 자체를 하지 못한 경우인지 확인합니다.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            SkipReason::FetchFailed { .. } | SkipReason::InsufficientData { .. }
        )
    }

    /// 데이터 문제를 종목 단위 에러로 변환합니다. 판정 탈락은 에러가 아니므로 `None`.
    pub fn to_error(&self, code: &str) -> Option<ScreenerError> {
        self.is_data_unavailable()
            .then(|| ScreenerError::data_unavailable(code, self.to_string()))
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::FetchFailed { series, error } => {
                write!(f, "{} fetch failed: {}", series, error)
            }
            SkipReason::InsufficientData {
                series,
                available,
                required,
            } => write!(f, "insufficient {} bars: {} < {}", series, available, required),
            SkipReason::Pattern { matches, required } => {
                write!(f, "tail pattern: {} of {} required bars", matches, required)
            }
            SkipReason::Support { touches, required } => {
                write!(f, "support: {} of {} required touches", touches, required)
            }
            SkipReason::Regime {
                regime,
                short_avg,
                long_avg,
            } => write!(
                f,
                "trend regime {} (short {} / long {})",
                regime,
                short_avg.round_dp(2),
                long_avg.round_dp(2)
            ),
            SkipReason::DrawdownVeto { drawdown } => {
                write!(f, "drawdown veto: {}%", (drawdown * Price::ONE_HUNDRED).round_dp(2))
            }
        }
    }
}

/// 한 종목의 판정 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentOutcome {
    Passed(ScreeningResult),
    Skipped(SkipReason),
}

/// 스크리닝 실행 결과.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningRun {
    /// 통과 종목 (유니버스 순서)
    pub results: Vec<ScreeningResult>,
    /// 실행 통계
    pub stats: RunStats,
    /// 취소되어 부분 결과인지 여부
    pub cancelled: bool,
}

/// 한 종목에 대한 모든 판정기의 진단 결과.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    pub instrument: Instrument,
    pub daily_bars: usize,
    pub monthly_bars: usize,
    /// 날짜 키 오류로 제외된 봉의 원본 키
    pub malformed_keys: Vec<String>,
    pub latest_close: Option<Price>,
    pub pattern: TailPatternCheck,
    pub support: SupportCheck,
    pub regime: RegimeVerdict,
    /// 세 판정을 모두 통과했는지 여부
    pub passed: bool,
}

/// 연속된 제공자 호출 사이의 최소 간격.
struct Throttle {
    delay: Duration,
    primed: bool,
}

impl Throttle {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            primed: false,
        }
    }

    /// 첫 호출은 바로, 이후 호출은 간격만큼 대기합니다.
    async fn wait(&mut self) {
        if self.primed && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.primed = true;
    }
}

/// 종목 하나를 조회하고 정규화한 결과.
struct LoadedSeries {
    series: InstrumentSeries,
    malformed_keys: Vec<String>,
}

/// 스크리닝 엔진.
pub struct ScreeningEngine {
    provider: Arc<dyn BarProvider>,
    pattern: TailPatternDetector,
    support: SupportDetector,
    regime: RegimeClassifier,
    throttle: Duration,
    fetch_timeout: Duration,
}

impl ScreeningEngine {
    /// 설정을 검증하고 엔진을 생성합니다.
    pub fn new(provider: Arc<dyn BarProvider>, config: &ScreenerConfig) -> ScreenerResult<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            pattern: TailPatternDetector::new(config.pattern.clone()),
            support: SupportDetector::new(config.support.clone()),
            regime: RegimeClassifier::new(config.regime.clone()),
            throttle: config.run.throttle(),
            fetch_timeout: config.run.fetch_timeout(),
        })
    }

    /// 조회 간격을 덮어씁니다 (0이면 비활성화).
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// 판정에 필요한 최소 일봉 수.
    pub fn min_daily_bars(&self) -> usize {
        MIN_PATTERN_BARS.max(self.support.params().min_count)
    }

    /// 판정에 필요한 최소 월봉 수.
    pub fn min_monthly_bars(&self) -> usize {
        self.regime.params().long_window
    }

    /// 유니버스 전체를 순서대로 스크리닝합니다.
    ///
    /// 빈 유니버스만 에러로 취급하며, 종목 단위 실패는 통계에만 남습니다.
    pub async fn run(
        &self,
        universe: &[Instrument],
        cancel: &CancellationToken,
    ) -> ScreenerResult<ScreeningRun> {
        if universe.is_empty() {
            return Err(ScreenerError::Config("universe is empty".to_string()));
        }

        let start = Instant::now();
        let mut throttle = Throttle::new(self.throttle);
        let mut stats = RunStats::new();
        let mut results = Vec::new();
        let mut cancelled = false;

        tracing::info!(
            provider = self.provider.provider_name(),
            instruments = universe.len(),
            "스크리닝 시작"
        );

        for (idx, instrument) in universe.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::warn!(
                    remaining = universe.len() - idx,
                    "취소 요청으로 스크리닝 중단"
                );
                cancelled = true;
                break;
            }

            let span = crate::instrument_span!("screen", instrument.code, instrument.name);
            let outcome = async {
                tracing::debug!(
                    progress = format!("{}/{}", idx + 1, universe.len()),
                    "판정 시작"
                );
                self.screen_instrument(instrument, &mut throttle, &mut stats)
                    .await
            }
            .instrument(span)
            .await;

            match outcome {
                InstrumentOutcome::Passed(result) => {
                    stats.record_pass();
                    results.push(result);
                }
                InstrumentOutcome::Skipped(reason) => stats.record_skip(&reason),
            }
        }

        stats.elapsed = start.elapsed();
        stats.log_summary(cancelled);

        Ok(ScreeningRun {
            results,
            stats,
            cancelled,
        })
    }

    /// 한 종목을 조회하고 판정합니다.
    async fn screen_instrument(
        &self,
        instrument: &Instrument,
        throttle: &mut Throttle,
        stats: &mut RunStats,
    ) -> InstrumentOutcome {
        let loaded = match self.load_series(instrument, throttle).await {
            Ok(loaded) => loaded,
            Err(reason) => {
                if let Some(err) = reason.to_error(&instrument.code) {
                    tracing::warn!(error = %err, "데이터 조회 실패로 건너뜀");
                }
                return InstrumentOutcome::Skipped(reason);
            }
        };
        stats.malformed_bars += loaded.malformed_keys.len();

        let outcome = self.evaluate(&loaded.series);
        match &outcome {
            InstrumentOutcome::Passed(result) => {
                tracing::info!(price = %result.price, "모든 조건 통과");
            }
            InstrumentOutcome::Skipped(reason) => match reason.to_error(&instrument.code) {
                Some(err) => tracing::warn!(error = %err, "데이터 부족으로 건너뜀"),
                None => tracing::info!(reason = %reason, "조건 미충족"),
            },
        }
        outcome
    }

    /// 정규화된 시계열을 판정합니다. 처음 실패한 판정기에서 중단합니다.
    pub fn evaluate(&self, series: &InstrumentSeries) -> InstrumentOutcome {
        if let Err(reason) = self.check_lengths(series) {
            return InstrumentOutcome::Skipped(reason);
        }

        let pattern = self.pattern.evaluate(&series.daily);
        if !pattern.passed {
            return InstrumentOutcome::Skipped(SkipReason::Pattern {
                matches: pattern.matches,
                required: pattern.required,
            });
        }

        let support = self.support.evaluate(&series.daily);
        if !support.passed {
            return InstrumentOutcome::Skipped(SkipReason::Support {
                touches: support.touches,
                required: support.required,
            });
        }

        match self.regime.classify(&series.monthly) {
            RegimeVerdict::InsufficientData {
                available,
                required,
            } => {
                return InstrumentOutcome::Skipped(SkipReason::InsufficientData {
                    series: SeriesKind::Monthly,
                    available,
                    required,
                });
            }
            RegimeVerdict::DrawdownVeto { drawdown, .. } => {
                return InstrumentOutcome::Skipped(SkipReason::DrawdownVeto { drawdown });
            }
            RegimeVerdict::Trend {
                short_avg,
                long_avg,
                regime,
                passed: false,
                ..
            } => {
                return InstrumentOutcome::Skipped(SkipReason::Regime {
                    regime,
                    short_avg,
                    long_avg,
                });
            }
            RegimeVerdict::Trend { passed: true, .. } => {}
        }

        match series.latest_close() {
            Some(price) => InstrumentOutcome::Passed(ScreeningResult {
                name: series.name.clone(),
                code: series.code.clone(),
                price,
            }),
            None => InstrumentOutcome::Skipped(SkipReason::InsufficientData {
                series: SeriesKind::Daily,
                available: 0,
                required: self.min_daily_bars(),
            }),
        }
    }

    /// 한 종목을 조회해 세 판정기의 결과를 모두 반환합니다.
    pub async fn inspect(&self, instrument: &Instrument) -> Result<InspectionReport, SkipReason> {
        let span = crate::instrument_span!("inspect", instrument.code);
        let mut throttle = Throttle::new(self.throttle);
        let loaded = self
            .load_series(instrument, &mut throttle)
            .instrument(span)
            .await?;
        let series = &loaded.series;

        let pattern = self.pattern.evaluate(&series.daily);
        let support = self.support.evaluate(&series.daily);
        let regime = self.regime.classify(&series.monthly);
        let passed = matches!(self.evaluate(series), InstrumentOutcome::Passed(_));

        Ok(InspectionReport {
            instrument: instrument.clone(),
            daily_bars: series.daily.len(),
            monthly_bars: series.monthly.len(),
            malformed_keys: loaded.malformed_keys.clone(),
            latest_close: series.latest_close(),
            pattern,
            support,
            regime,
            passed,
        })
    }

    fn check_lengths(&self, series: &InstrumentSeries) -> Result<(), SkipReason> {
        let required = self.min_daily_bars();
        if series.daily.len() < required {
            return Err(SkipReason::InsufficientData {
                series: SeriesKind::Daily,
                available: series.daily.len(),
                required,
            });
        }
        let required = self.min_monthly_bars();
        if series.monthly.len() < required {
            return Err(SkipReason::InsufficientData {
                series: SeriesKind::Monthly,
                available: series.monthly.len(),
                required,
            });
        }
        Ok(())
    }

    /// 일봉, 월봉 순서로 조회하고 정규화합니다. 일봉 조회가 실패하면 월봉은 조회하지 않습니다.
    async fn load_series(
        &self,
        instrument: &Instrument,
        throttle: &mut Throttle,
    ) -> Result<LoadedSeries, SkipReason> {
        throttle.wait().await;
        let daily = self
            .fetch_with_timeout(SeriesKind::Daily, self.provider.fetch_daily(&instrument.code))
            .await?;

        throttle.wait().await;
        let monthly = self
            .fetch_with_timeout(
                SeriesKind::Monthly,
                self.provider.fetch_monthly(&instrument.code),
            )
            .await?;

        let daily = normalize_daily(daily);
        let monthly = normalize_monthly(monthly);

        let malformed_keys: Vec<String> = daily
            .rejected
            .iter()
            .chain(monthly.rejected.iter())
            .map(|err| {
                tracing::warn!(error = %err, "잘못된 날짜 키의 봉 제외");
                err.key.clone()
            })
            .collect();

        tracing::debug!(
            daily = daily.bars.len(),
            monthly = monthly.bars.len(),
            malformed = malformed_keys.len(),
            "시계열 정규화 완료"
        );

        Ok(LoadedSeries {
            series: InstrumentSeries {
                code: instrument.code.clone(),
                name: instrument.name.clone(),
                daily: daily.bars,
                monthly: monthly.bars,
            },
            malformed_keys,
        })
    }

    async fn fetch_with_timeout<T>(
        &self,
        series: SeriesKind,
        fetch: impl Future<Output = Result<Vec<T>, ProviderError>>,
    ) -> Result<Vec<T>, SkipReason> {
        let error = match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(Ok(records)) if !records.is_empty() => return Ok(records),
            Ok(Ok(_)) => ProviderError::NotFound("빈 응답".to_string()),
            Ok(Err(e)) => e,
            Err(_) => ProviderError::Timeout(format!("{}ms", self.fetch_timeout.as_millis())),
        };

        Err(SkipReason::FetchFailed {
            series,
            error: error.to_string(),
        })
    }
}
