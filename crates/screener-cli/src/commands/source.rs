//! 데이터 소스와 유니버스 선택.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use screener_core::{BarProvider, Instrument, ScreenerConfig};
use screener_data::{load_universe, validate_universe, CsvDirectoryProvider, JsonFixtureProvider};

/// 데이터 소스 관련 CLI 인자.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// 종목별 일봉/월봉이 담긴 JSON 픽스처 파일
    #[arg(long, conflicts_with = "csv_dir")]
    pub fixture: Option<PathBuf>,

    /// `<code>_daily.csv`, `<code>_monthly.csv`가 있는 디렉토리
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// 유니버스 파일 (.json 또는 .toml, 설정 파일의 유니버스보다 우선)
    #[arg(long)]
    pub universe: Option<PathBuf>,
}

/// 선택된 제공자와 유니버스.
pub struct DataSource {
    pub provider: Arc<dyn BarProvider>,
    pub universe: Vec<Instrument>,
}

/// 유니버스는 `--universe` 파일, 설정 파일, 픽스처 순서로 찾습니다.
pub fn resolve_source(args: &SourceArgs, config: &ScreenerConfig) -> Result<DataSource> {
    let explicit = match &args.universe {
        Some(path) => Some(
            load_universe(path)
                .with_context(|| format!("Failed to load universe from {}", path.display()))?,
        ),
        None => None,
    };
    let configured = if explicit.is_some() || config.universe.is_empty() {
        None
    } else {
        validate_universe(&config.universe).context("Invalid [[universe]] in configuration")?;
        Some(config.universe.clone())
    };

    if let Some(path) = &args.fixture {
        let provider = JsonFixtureProvider::from_path(path)
            .with_context(|| format!("Failed to load fixture {}", path.display()))?;
        let universe = explicit
            .or(configured)
            .unwrap_or_else(|| provider.universe().to_vec());
        return Ok(DataSource {
            provider: Arc::new(provider),
            universe,
        });
    }

    if let Some(dir) = &args.csv_dir {
        if !dir.is_dir() {
            bail!("CSV directory does not exist: {}", dir.display());
        }
        let universe = explicit.or(configured).unwrap_or_default();
        return Ok(DataSource {
            provider: Arc::new(CsvDirectoryProvider::new(dir)),
            universe,
        });
    }

    bail!("No data source given: pass --fixture <file> or --csv-dir <dir>")
}
