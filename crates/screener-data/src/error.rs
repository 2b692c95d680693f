//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 지원하지 않는 파일 형식
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// 결과 파일 쓰기 실패
    #[error("Artifact write error: {0}")]
    ArtifactWrite(String),

    /// Git 게시 단계 실패
    #[error("Git {step} failed: {detail}")]
    GitFailed { step: &'static str, detail: String },
}

/// 데이터 작업을 위한 Result 타입.
pub type Result<T> = std::result::Result<T, DataError>;

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for DataError {
    fn from(err: toml::de::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

impl From<tempfile::PersistError> for DataError {
    fn from(err: tempfile::PersistError) -> Self {
        DataError::ArtifactWrite(err.to_string())
    }
}
