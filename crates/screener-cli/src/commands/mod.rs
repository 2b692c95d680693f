//! CLI 명령 구현.

pub mod inspect;
pub mod run;
pub mod source;
pub mod universe;

pub use inspect::inspect_instrument;
pub use run::{run_screening, RunOptions, RunReport};
pub use source::{resolve_source, DataSource, SourceArgs};
pub use universe::print_universe;
