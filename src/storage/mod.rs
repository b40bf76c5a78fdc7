mod sources;
mod types;

pub use sources::{parse_sources, SourceStore, LINE_SEPARATOR};
pub use types::{Source, StoreError};
