//! 결과 JSON 파일 저장.
//!
//! 같은 디렉토리에 임시 파일을 쓴 뒤 이름을 바꾸므로, 읽는 쪽은 항상
//! 이전 결과 전체 또는 새 결과 전체만 보게 됩니다.

use std::io::Write;
use std::path::Path;

use screener_core::ScreeningResult;

use crate::error::{DataError, Result};

/// 결과 목록을 보기 좋은 JSON 배열로 직렬화합니다. 비어 있으면 `[]`.
pub fn render_artifact(results: &[ScreeningResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// 결과 파일을 원자적으로 덮어씁니다.
pub fn write_artifact(path: &Path, results: &[ScreeningResult]) -> Result<()> {
    let body = render_artifact(results)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| DataError::ArtifactWrite(format!("{}: {}", dir.display(), e)))?;
    file.write_all(body.as_bytes())?;
    file.write_all(b"\n")?;
    file.as_file().sync_all()?;
    file.persist(path)?;

    tracing::info!(path = %path.display(), count = results.len(), "결과 파일 저장 완료");
    Ok(())
}
