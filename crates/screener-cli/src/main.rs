//! 캔들스틱 패턴 스크리너 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 픽스처 파일로 스크리닝 후 data.json 갱신
//! screener run --config config/default.toml --fixture stocks.json
//!
//! # CSV 디렉토리와 별도 유니버스 파일 사용
//! screener run --csv-dir data/bars --universe universe.json --output public/data.json
//!
//! # 한 종목의 판정 상세
//! screener inspect 005930 --fixture stocks.json
//!
//! # 유니버스 확인
//! screener universe --config config/default.toml
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use screener_cli::commands::{
    inspect_instrument, print_universe, run_screening, RunOptions, SourceArgs,
};
use screener_core::logging::{init_logging, LogConfig};
use screener_core::ScreenerConfig;

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Candlestick screener - 꼬리 우상향 / 바닥 2회 / 추세 조건 검색", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 유니버스 전체 스크리닝 후 결과 파일 게시
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// 결과 파일 경로 (기본: 설정의 output.path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 데이터 조회 간격 비활성화
        #[arg(long, default_value = "false")]
        no_throttle: bool,
    },

    /// 한 종목의 판정기별 진단 출력
    Inspect {
        /// 종목 코드 (예: 005930)
        code: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// 스크리닝 대상 종목 출력
    Universe {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = ScreenerConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let mut log_config = LogConfig::from_settings(&config.logging);
    if let Some(level) = cli.log_level {
        log_config.level = level;
    }
    init_logging(log_config).map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;

    match cli.command {
        Commands::Run {
            source,
            output,
            no_throttle,
        } => {
            let cancel = CancellationToken::new();
            let signal_token = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("종료 신호 수신, 현재 종목 처리 후 중단합니다");
                    signal_token.cancel();
                }
            });

            let options = RunOptions {
                source,
                output,
                no_throttle,
            };
            let report = run_screening(config, options, cancel).await?;
            report
                .publish
                .context("Screening finished but results could not be published")?;
        }
        Commands::Inspect { code, source } => {
            inspect_instrument(&config, &source, &code).await?;
        }
        Commands::Universe { source } => {
            print_universe(&config, &source)?;
        }
    }

    Ok(())
}
