//! 스크리닝을 위한 도메인 모델.

mod bar;
mod bar_provider;
mod instrument;
mod trend_regime;

pub use bar::*;
pub use bar_provider::*;
pub use instrument::*;
pub use trend_regime::*;
