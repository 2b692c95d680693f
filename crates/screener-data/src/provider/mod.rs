//! 봉 데이터 Provider 모듈.
//!
//! ## 파일 기반
//! - `JsonFixtureProvider`: 종목별 일봉/월봉이 담긴 JSON 문서, 유니버스도 함께 제공
//! - `CsvDirectoryProvider`: 종목별 `<code>_daily.csv`, `<code>_monthly.csv`
//!
//! ## 메모리
//! - `InMemoryProvider`: 테스트 및 임베딩용

pub mod csv_dir;
pub mod in_memory;
pub mod json_fixture;

pub use csv_dir::CsvDirectoryProvider;
pub use in_memory::InMemoryProvider;
pub use json_fixture::{FixtureInstrument, JsonFixtureProvider};
