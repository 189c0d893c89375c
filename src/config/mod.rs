//! Configuration for contextmap, read from `.contextmap.toml`.

mod core;
mod loader;

pub use core::{
    default_auto_detect_keywords, default_builtin_prefix, default_coupling_discount,
    default_domain_based_weight, default_import_based_weight, default_log_base,
    default_max_context_budget, default_max_depth, default_max_fragmentation,
    default_min_cohesion, default_structural_weight, CohesionWeights, ContextConfig,
    ContextThresholds, ExtractionConfig, FragmentationConfig, IgnoreConfig,
};

pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
