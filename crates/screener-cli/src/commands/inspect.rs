//! `inspect` 명령: 한 종목의 판정기별 진단.

use anyhow::{anyhow, Result};

use screener_core::{InspectionReport, Instrument, ScreenerConfig, ScreeningEngine};

use super::source::{resolve_source, SourceArgs};

/// 한 종목을 조회해 세 판정기의 결과를 모두 출력합니다.
pub async fn inspect_instrument(
    config: &ScreenerConfig,
    source: &SourceArgs,
    code: &str,
) -> Result<InspectionReport> {
    let source = resolve_source(source, config)?;
    let instrument = source
        .universe
        .iter()
        .find(|instrument| instrument.code == code)
        .cloned()
        .unwrap_or_else(|| Instrument::new(code, code));

    let engine = ScreeningEngine::new(source.provider, config)?;
    let report = engine
        .inspect(&instrument)
        .await
        .map_err(|reason| anyhow!("{}: {}", instrument, reason))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report)
}
