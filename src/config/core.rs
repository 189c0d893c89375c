use serde::{Deserialize, Serialize};

/// Root configuration structure for contextmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ContextConfig {
    /// Cohesion signal weights
    #[serde(default)]
    pub cohesion: CohesionWeights,

    /// Fragmentation scoring options
    #[serde(default)]
    pub fragmentation: FragmentationConfig,

    /// Issue thresholds
    #[serde(default)]
    pub thresholds: ContextThresholds,

    /// Import/export extraction options
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Ignore patterns
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

impl ContextConfig {
    /// Get ignore patterns from configuration
    pub fn get_ignore_patterns(&self) -> Vec<String> {
        self.ignore.patterns.clone()
    }
}

/// Relative weights of the three cohesion signals.
///
/// Weights do not need to sum to 1.0: the scorer renormalizes over whichever
/// signals are available for a file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CohesionWeights {
    #[serde(default = "default_import_based_weight")]
    pub import_based: f64,

    #[serde(default = "default_structural_weight")]
    pub structural: f64,

    #[serde(default = "default_domain_based_weight")]
    pub domain_based: f64,
}

pub fn default_import_based_weight() -> f64 {
    0.5
}

pub fn default_structural_weight() -> f64 {
    0.3
}

pub fn default_domain_based_weight() -> f64 {
    0.2
}

impl Default for CohesionWeights {
    fn default() -> Self {
        Self {
            import_based: default_import_based_weight(),
            structural: default_structural_weight(),
            domain_based: default_domain_based_weight(),
        }
    }
}

impl CohesionWeights {
    // Pure function: Check if weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && (0.0..=1.0).contains(&weight)
    }

    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    /// Validate every weight and require at least one to be positive
    pub fn validate(&self) -> Result<(), String> {
        Self::validate_weight(self.import_based, "Import-based")?;
        Self::validate_weight(self.structural, "Structural")?;
        Self::validate_weight(self.domain_based, "Domain-based")?;

        if self.import_based + self.structural + self.domain_based <= 0.0 {
            return Err("At least one cohesion weight must be positive".to_string());
        }
        Ok(())
    }
}

/// Options for domain fragmentation scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FragmentationConfig {
    /// Use `log(dirs) / log(files)` instead of the linear ratio
    #[serde(default)]
    pub use_log_scale: bool,

    #[serde(default = "default_log_base")]
    pub log_base: f64,

    /// Largest share of the base score that shared imports can remove
    #[serde(default = "default_coupling_discount")]
    pub coupling_discount: f64,
}

pub fn default_log_base() -> f64 {
    std::f64::consts::E
}

pub fn default_coupling_discount() -> f64 {
    0.2
}

impl Default for FragmentationConfig {
    fn default() -> Self {
        Self {
            use_log_scale: false,
            log_base: default_log_base(),
            coupling_discount: default_coupling_discount(),
        }
    }
}

impl FragmentationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.log_base.is_finite() && self.log_base > 0.0 && self.log_base != 1.0) {
            return Err(format!(
                "log_base must be positive and not 1.0, got {}",
                self.log_base
            ));
        }
        if !(0.0..=1.0).contains(&self.coupling_discount) {
            return Err("coupling_discount must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

/// Thresholds used to raise per-file issues.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ContextThresholds {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_max_context_budget")]
    pub max_context_budget: usize,

    #[serde(default = "default_min_cohesion")]
    pub min_cohesion: f64,

    #[serde(default = "default_max_fragmentation")]
    pub max_fragmentation: f64,
}

pub fn default_max_depth() -> usize {
    5
}

pub fn default_max_context_budget() -> usize {
    25_000
}

pub fn default_min_cohesion() -> f64 {
    0.6
}

pub fn default_max_fragmentation() -> f64 {
    0.5
}

impl Default for ContextThresholds {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_context_budget: default_max_context_budget(),
            min_cohesion: default_min_cohesion(),
            max_fragmentation: default_max_fragmentation(),
        }
    }
}

/// Import and export extraction options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionConfig {
    /// Imports starting with this prefix are platform builtins and dropped
    #[serde(default = "default_builtin_prefix")]
    pub builtin_prefix: String,

    /// Keywords tried before the auto-derived vocabulary
    #[serde(default)]
    pub extra_domain_keywords: Vec<String>,

    /// Derive domain keywords from directory names
    #[serde(default = "default_auto_detect_keywords")]
    pub auto_detect_keywords: bool,
}

pub fn default_builtin_prefix() -> String {
    "node:".to_string()
}

pub fn default_auto_detect_keywords() -> bool {
    true
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            builtin_prefix: default_builtin_prefix(),
            extra_domain_keywords: Vec::new(),
            auto_detect_keywords: default_auto_detect_keywords(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}
