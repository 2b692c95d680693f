//! `run` 명령: 유니버스 전체 스크리닝 후 결과 게시.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use screener_core::{ScreenerConfig, ScreeningEngine, ScreeningRun};
use screener_data::{DataError, GitOutcome, PublishReport, ResultPublisher};

use super::source::{resolve_source, SourceArgs};

/// `run` 실행 옵션.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub source: SourceArgs,
    /// 결과 파일 경로 (설정 파일보다 우선)
    pub output: Option<PathBuf>,
    /// 조회 간격 비활성화
    pub no_throttle: bool,
}

/// `run` 실행 결과.
///
/// 결과 파일 게시 실패는 판정 결과와 별도로 `publish`에 담깁니다.
#[derive(Debug)]
pub struct RunReport {
    pub run: ScreeningRun,
    pub publish: std::result::Result<PublishReport, DataError>,
}

/// 스크리닝을 실행하고 결과를 게시합니다.
///
/// 취소되더라도 그때까지의 결과를 정상 실행과 같은 방식으로 게시합니다.
/// 판정 결과는 게시 전에 출력되므로 결과 파일 쓰기에 실패해도 남습니다.
pub async fn run_screening(
    mut config: ScreenerConfig,
    options: RunOptions,
    cancel: CancellationToken,
) -> Result<RunReport> {
    if let Some(output) = options.output {
        config.output.path = output;
    }

    let source = resolve_source(&options.source, &config)?;
    let mut engine =
        ScreeningEngine::new(source.provider, &config).context("Invalid screening configuration")?;
    if options.no_throttle {
        engine = engine.with_throttle(Duration::ZERO);
    }

    let run = engine
        .run(&source.universe, &cancel)
        .await
        .context("Screening run failed")?;

    println!();
    println!("스크리닝 결과: {}개 종목 통과", run.results.len());
    for result in &run.results {
        println!("  {} ({}) {}", result.name, result.code, result.price);
    }
    if run.cancelled {
        println!("⚠️  취소되어 일부 종목만 판정했습니다");
    }

    let publisher = ResultPublisher::from_config(&config.output);
    let publish = publisher.publish(&run).await;
    match &publish {
        Ok(report) => {
            println!("결과 파일: {}", report.artifact.display());
            match &report.git {
                GitOutcome::Disabled => {}
                GitOutcome::Pushed => println!("Git 게시 완료"),
                GitOutcome::Failed(detail) => println!("❌ Git 게시 실패: {}", detail),
            }
        }
        Err(e) => println!("❌ 결과 파일 저장 실패 ({}): {}", publisher.path().display(), e),
    }

    Ok(RunReport { run, publish })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 조건을 통과하지 못하는 종목 하나짜리 픽스처
    const FIXTURE: &str = r#"[
        {
            "name": "삼성전자",
            "code": "005930",
            "daily_data": [
                {"date": "2024-01-15", "open": 75000, "high": 78000, "low": 74500, "close": 77800},
                {"date": "2024-01-16", "open": 77500, "high": 78500, "low": 77000, "close": 78200},
                {"date": "2024-01-17", "open": 78000, "high": 79000, "low": 77500, "close": 78800}
            ],
            "monthly_data": [
                {"date": "2023-08", "close": 72000},
                {"date": "2023-09", "close": 73000},
                {"date": "2023-10", "close": 74000},
                {"date": "2023-11", "close": 75000},
                {"date": "2023-12", "close": 76000},
                {"date": "2024-01", "close": 77000}
            ]
        }
    ]"#;

    #[tokio::test]
    async fn test_run_writes_artifact_even_when_nothing_passes() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("stocks.json");
        std::fs::write(&fixture, FIXTURE).unwrap();
        let output = dir.path().join("out").join("data.json");

        let options = RunOptions {
            source: SourceArgs {
                fixture: Some(fixture),
                ..Default::default()
            },
            output: Some(output.clone()),
            no_throttle: true,
        };
        let report = run_screening(ScreenerConfig::default(), options, CancellationToken::new())
            .await
            .unwrap()
            .publish
            .unwrap();

        assert_eq!(report.result_count, 0);
        assert_eq!(report.git, GitOutcome::Disabled);
        assert_eq!(std::fs::read_to_string(&output).unwrap().trim(), "[]");
    }

    #[tokio::test]
    async fn test_cancelled_run_still_publishes() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("stocks.json");
        std::fs::write(&fixture, FIXTURE).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let options = RunOptions {
            source: SourceArgs {
                fixture: Some(fixture),
                ..Default::default()
            },
            output: Some(dir.path().join("data.json")),
            no_throttle: true,
        };
        let report = run_screening(ScreenerConfig::default(), options, cancel)
            .await
            .unwrap();
        assert!(report.run.cancelled);

        let published = report.publish.unwrap();
        assert!(published.partial);
        assert!(published.artifact.exists());
    }

    #[tokio::test]
    async fn test_artifact_write_failure_keeps_results() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("stocks.json");
        std::fs::write(&fixture, FIXTURE).unwrap();

        // 결과 파일 경로에 디렉토리가 이미 있으면 rename이 실패함
        let taken = dir.path().join("taken");
        std::fs::create_dir(&taken).unwrap();

        let options = RunOptions {
            source: SourceArgs {
                fixture: Some(fixture),
                ..Default::default()
            },
            output: Some(taken),
            no_throttle: true,
        };
        let report = run_screening(ScreenerConfig::default(), options, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.run.stats.evaluated, 1);
        assert!(matches!(report.publish, Err(DataError::ArtifactWrite(_))));
    }
}
