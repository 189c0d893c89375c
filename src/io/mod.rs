//! Source collection: the file-scanning side of an analysis run.

pub mod walker;

pub use walker::{collect_sources, SourceWalker, SOURCE_EXTENSIONS};
