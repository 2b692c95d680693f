//! `universe` 명령: 스크리닝 대상 종목 출력.

use anyhow::Result;

use screener_core::{Instrument, ScreenerConfig};

use super::source::{resolve_source, SourceArgs};

/// 설정 또는 인자로 결정된 유니버스를 출력합니다.
pub fn print_universe(config: &ScreenerConfig, source: &SourceArgs) -> Result<Vec<Instrument>> {
    let universe = if source.fixture.is_some() || source.csv_dir.is_some() {
        resolve_source(source, config)?.universe
    } else if let Some(path) = &source.universe {
        screener_data::load_universe(path)?
    } else {
        config.universe.clone()
    };

    println!("=== 스크리닝 유니버스 ({}개) ===", universe.len());
    for (idx, instrument) in universe.iter().enumerate() {
        println!("{:>3}. {:<8} {}", idx + 1, instrument.code, instrument.name);
    }
    Ok(universe)
}
