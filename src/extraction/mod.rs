//! Turning source text into imports, exports, domains and token costs.

pub mod domain;
pub mod exports;
pub mod imports;
pub mod tokens;

pub use domain::{
    derive_domain_keywords, singularize, singularize_naive, split_identifier, DomainVocabulary,
    DEFAULT_DOMAIN_KEYWORDS, PATH_STOP_WORDS,
};
pub use exports::{extract_exports_with_fallback, ExportExtractor, RawExport, RegexExportExtractor};
pub use imports::extract_imports;
pub use tokens::{count_lines, CharRatioEstimator, TokenEstimator};
