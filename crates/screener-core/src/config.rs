//! 설정 관리.
//!
//! 이 모듈은 스크리너 설정을 정의하고 관리합니다.
//! 설정은 내장 기본값 → TOML 파일 → `SCREENER__` 환경 변수 순으로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::Instrument;
use crate::error::{ScreenerError, ScreenerResult};
use crate::screening::{RegimeParams, SupportParams, TailPatternParams};

/// Git 자동 푸시를 켜는 환경 변수.
pub const AUTO_GIT_PUSH_ENV: &str = "AUTO_GIT_PUSH";

/// 스크리너 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScreenerConfig {
    /// 꼬리 우상향 판정 설정
    pub pattern: TailPatternParams,
    /// 바닥 2회 판정 설정
    pub support: SupportParams,
    /// 추세 레짐 판정 설정
    pub regime: RegimeParams,
    /// 실행(조회 간격, 타임아웃) 설정
    pub run: RunConfig,
    /// 결과 출력 설정
    pub output: OutputConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 스크리닝 대상 종목 (순서 유지)
    pub universe: Vec<Instrument>,
}

/// 실행 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// 연속된 데이터 조회 사이 최소 간격 (밀리초, 0이면 비활성화)
    pub throttle_ms: u64,
    /// 조회 1건당 타임아웃 (밀리초)
    pub fetch_timeout_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 500,
            fetch_timeout_ms: 10_000,
        }
    }
}

impl RunConfig {
    /// 조회 간격을 Duration으로 반환
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// 조회 타임아웃을 Duration으로 반환
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// 결과 출력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 결과 JSON 경로
    pub path: PathBuf,
    /// Git 게시 설정
    pub git: GitPublishConfig,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data.json"),
            git: GitPublishConfig::default(),
        }
    }
}

/// Git 게시 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GitPublishConfig {
    /// 활성화 여부 (`AUTO_GIT_PUSH` 환경 변수가 우선)
    pub enabled: bool,
    /// 푸시할 원격 저장소 (없으면 upstream)
    pub remote: Option<String>,
    /// 푸시할 브랜치 (없으면 upstream)
    pub branch: Option<String>,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl ScreenerConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> ScreenerResult<Self> {
        let builder = config::Config::builder()
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("SCREENER")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_git_toggle(std::env::var(AUTO_GIT_PUSH_ENV).ok().as_deref());
        config.validate()?;
        Ok(config)
    }

    /// 파일이 주어지면 로드하고, 없으면 기본값에 환경 변수만 적용합니다.
    pub fn load_or_default(path: Option<&Path>) -> ScreenerResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("SCREENER")
                .separator("__")
                .try_parsing(true),
        );
        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_git_toggle(std::env::var(AUTO_GIT_PUSH_ENV).ok().as_deref());
        config.validate()?;
        Ok(config)
    }

    /// `AUTO_GIT_PUSH` 값이 있으면 Git 게시 여부를 덮어씁니다. `true`/`1`만 활성화입니다.
    fn apply_git_toggle(&mut self, value: Option<&str>) {
        if let Some(value) = value {
            let value = value.trim();
            self.output.git.enabled = value.eq_ignore_ascii_case("true") || value == "1";
        }
    }

    /// 판정 파라미터의 일관성을 검사합니다.
    pub fn validate(&self) -> ScreenerResult<()> {
        self.pattern.validate()?;
        self.support.validate()?;
        self.regime.validate()?;
        if self.run.fetch_timeout_ms == 0 {
            return Err(ScreenerError::Config(
                "run.fetch_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::{PriceField, TrendMode};
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ScreenerConfig::default();
        assert_eq!(config.pattern.window, 20);
        assert_eq!(config.pattern.tail_ratio, dec!(0.30));
        assert_eq!(config.support.field, PriceField::Low);
        assert_eq!(config.regime.mode, TrendMode::UptrendRequired);
        assert_eq!(config.run.throttle(), Duration::from_millis(500));
        assert_eq!(config.output.path, PathBuf::from("data.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[support]
field = "close"
tolerance = 0.03

[regime]
mode = "downtrend-exclusion"
drawdown_veto = false

[[universe]]
name = "삼성전자"
code = "005930"
"#
        )
        .unwrap();

        let config = ScreenerConfig::load(file.path()).unwrap();
        assert_eq!(config.support.field, PriceField::Close);
        assert_eq!(config.support.tolerance, dec!(0.03));
        assert_eq!(config.support.window, 20);
        assert_eq!(config.regime.mode, TrendMode::DowntrendExclusion);
        assert!(!config.regime.drawdown_veto);
        assert_eq!(config.universe.len(), 1);
        assert_eq!(config.universe[0].code, "005930");
    }

    #[test]
    fn test_git_toggle_overrides_config() {
        let mut config = ScreenerConfig::default();
        config.apply_git_toggle(None);
        assert!(!config.output.git.enabled);

        config.apply_git_toggle(Some("TRUE"));
        assert!(config.output.git.enabled);

        config.apply_git_toggle(None);
        assert!(config.output.git.enabled);

        config.apply_git_toggle(Some("0"));
        assert!(!config.output.git.enabled);

        config.apply_git_toggle(Some(" 1 "));
        assert!(config.output.git.enabled);

        config.apply_git_toggle(Some("yes"));
        assert!(!config.output.git.enabled);
    }

    #[test]
    fn test_validate_rejects_small_pattern_window() {
        let mut config = ScreenerConfig::default();
        config.pattern.window = 2;
        assert!(matches!(config.validate(), Err(ScreenerError::Config(_))));
    }
}
