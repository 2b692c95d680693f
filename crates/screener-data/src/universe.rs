//! 스크리닝 유니버스 로더.
//!
//! - `.json`: `[{"name": ..., "code": ...}, ...]` (픽스처 문서도 그대로 읽을 수 있음)
//! - `.toml`: `[[universe]]` 테이블 배열

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use screener_core::Instrument;

use crate::error::{DataError, Result};

#[derive(Debug, Deserialize)]
struct TomlUniverse {
    #[serde(default)]
    universe: Vec<Instrument>,
}

/// 파일 확장자에 따라 유니버스를 읽습니다.
pub fn load_universe(path: impl AsRef<Path>) -> Result<Vec<Instrument>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let universe = match extension.as_deref() {
        Some("json") => parse_json_universe(&content)?,
        Some("toml") => parse_toml_universe(&content)?,
        other => {
            return Err(DataError::UnsupportedFormat(format!(
                "{} (extension {:?})",
                path.display(),
                other
            )))
        }
    };

    tracing::info!(path = %path.display(), count = universe.len(), "유니버스 로드 완료");
    Ok(universe)
}

/// JSON 배열에서 유니버스를 읽습니다.
pub fn parse_json_universe(content: &str) -> Result<Vec<Instrument>> {
    let universe: Vec<Instrument> = serde_json::from_str(content)?;
    validate_universe(&universe)?;
    Ok(universe)
}

/// TOML `[[universe]]`에서 유니버스를 읽습니다.
pub fn parse_toml_universe(content: &str) -> Result<Vec<Instrument>> {
    let parsed: TomlUniverse = toml::from_str(content)?;
    validate_universe(&parsed.universe)?;
    Ok(parsed.universe)
}

/// 빈 코드와 중복 코드를 거부합니다.
pub fn validate_universe(universe: &[Instrument]) -> Result<()> {
    let mut seen = HashSet::with_capacity(universe.len());
    for instrument in universe {
        if instrument.code.trim().is_empty() {
            return Err(DataError::InvalidData(format!(
                "instrument '{}' has an empty code",
                instrument.name
            )));
        }
        if !seen.insert(instrument.code.as_str()) {
            return Err(DataError::InvalidData(format!(
                "duplicate instrument code: {}",
                instrument.code
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_keeps_order_and_ignores_extra_fields() {
        let universe = parse_json_universe(
            r#"[
                {"name": "삼성전자", "code": "005930", "daily_data": []},
                {"name": "SK하이닉스", "code": "000660"}
            ]"#,
        )
        .unwrap();
        assert_eq!(universe[0].code, "005930");
        assert_eq!(universe[1].name, "SK하이닉스");
    }

    #[test]
    fn test_parse_toml() {
        let universe = parse_toml_universe(
            r#"
[[universe]]
name = "NAVER"
code = "035420"

[[universe]]
name = "카카오"
code = "035720"
"#,
        )
        .unwrap();
        assert_eq!(universe.len(), 2);
        assert_eq!(universe[1].code, "035720");
    }

    #[test]
    fn test_duplicates_rejected() {
        let result = parse_json_universe(
            r#"[{"name": "A", "code": "005930"}, {"name": "B", "code": "005930"}]"#,
        );
        assert!(matches!(result, Err(DataError::InvalidData(_))));
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("universe.yaml");
        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(
            load_universe(&path),
            Err(DataError::UnsupportedFormat(_))
        ));
    }
}
