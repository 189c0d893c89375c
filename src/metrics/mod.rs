//! Cohesion and fragmentation scoring.
//!
//! Everything here is a pure function of its arguments: co-usage data and
//! weights are passed in explicitly, never read from shared state.

pub mod clusters;
pub mod cohesion;
pub mod entropy;
pub mod fragmentation;

pub use clusters::{detect_domain_clusters, file_cohesion_scores};
pub use cohesion::{
    calculate_cohesion, domain_cohesion, import_based_cohesion, is_test_file,
    structural_cohesion, CohesionOptions,
};
pub use entropy::{jaccard_similarity, mean_pairwise, normalized_entropy, shannon_entropy};
pub use fragmentation::{
    apply_coupling_discount, calculate_directory_distance, calculate_fragmentation,
    calculate_import_coupling, calculate_path_entropy, generate_consolidation_plan,
    target_file_count, FragmentationScale,
};
