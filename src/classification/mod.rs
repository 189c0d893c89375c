//! File classification and the score adjustments it drives.
//!
//! The pipeline per file is: raw cohesion and domain list in,
//! [`classify_file`] picks a [`FileClassification`], then the adjustment
//! functions reinterpret cohesion and fragmentation for that kind of file.

pub mod adjustment;
pub mod entity;
pub mod recommendations;
pub mod rules;
pub mod signals;

pub use adjustment::{
    adjust_cohesion_for_classification, adjust_fragmentation_for_classification,
    exports_share_theme, fragmentation_multiplier,
};
pub use entity::{entity_tokens, has_shared_entity_noun, shared_entity_nouns};
pub use recommendations::classification_recommendations;
pub use rules::{
    classify_file, matching_rule, ClassificationContext, ClassificationRule, FileClassification,
    CLASSIFICATION_RULES,
};
pub use signals::FileSignals;
