//! 결과 저장소.

pub mod artifact;

pub use artifact::{render_artifact, write_artifact};
